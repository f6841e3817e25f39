//! # Packrat
//!
//! The demonstration layer over [`packrat_core`]: a set of plain-data
//! component kinds (positions, health, inventories, descriptions,
//! physics), the systems that tick them, and the scenario configuration
//! for the walkthrough binary.
//!
//! The storage engine itself lives in `packrat_core`; nothing in this
//! crate touches its internals — everything goes through identifiers and
//! the store's public surface, exactly as an application would.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod components;
pub mod scenario;
pub mod systems;
pub mod text;

pub use components::{component_registry, Shorthand};
pub use scenario::{Scenario, ScenarioError};
pub use text::FixedText;
