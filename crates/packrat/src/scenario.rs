//! # Scenario Configuration
//!
//! Optional TOML configuration for the walkthrough binary: store capacity,
//! seeded content, and tick pacing. Loaded once at startup; defaults apply
//! when no file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use packrat_core::MAX_SLOTS;

/// Errors raised while loading a scenario file.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for a scenario.
    #[error("malformed scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed values violate a constraint.
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// Walkthrough parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Slot capacity per storage (entities and every component kind).
    pub capacity: usize,
    /// Number of treasure chests seeded into the world.
    pub chest_count: usize,
    /// Poison drain rate in hit points per second.
    pub poison_drain_per_second: f32,
    /// Number of update ticks to run.
    pub ticks: u32,
    /// Externally driven delta time per tick, in seconds.
    pub tick_seconds: f32,
    /// Seed for the flavor rolls (eye counts, inscriptions).
    pub seed: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            capacity: 4096,
            chest_count: 3,
            poison_drain_per_second: 0.1,
            ticks: 1000,
            tick_seconds: 0.01,
            seed: 1337,
        }
    }
}

impl Scenario {
    /// Loads and validates a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] when the file cannot be read, is not
    /// valid TOML, or violates a scenario constraint.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path)?;
        let scenario: Self = toml::from_str(&raw)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if !(2..=MAX_SLOTS).contains(&self.capacity) {
            return Err(ScenarioError::Invalid(format!(
                "capacity must be within 2..={MAX_SLOTS}, got {}",
                self.capacity
            )));
        }
        if self.chest_count + 2 > self.capacity {
            return Err(ScenarioError::Invalid(format!(
                "{} chests do not fit a capacity of {}",
                self.chest_count, self.capacity
            )));
        }
        if self.poison_drain_per_second < 0.0 {
            return Err(ScenarioError::Invalid(
                "poison drain must not be negative".to_string(),
            ));
        }
        if self.tick_seconds <= 0.0 {
            return Err(ScenarioError::Invalid(
                "tick_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
