//! # Packrat Core
//!
//! An in-process object-storage engine built on packed generational slot
//! maps. Arbitrary entities are composed at runtime from a build-time-fixed
//! set of plain-data component kinds; each kind's instances stay densely
//! packed for linear bulk iteration.
//!
//! ## Architecture rules
//!
//! 1. **All storage is reserved upfront** — capacity is fixed at
//!    construction; exhaustion is a fatal configuration error
//! 2. **Identifiers, never addresses** — removal compacts by swapping, so
//!    external code holds [`Ident`] values and re-resolves on every access
//! 3. **Removal is a request** — deletions queue until [`World::sync`],
//!    which notifies interested systems before reclaiming anything
//!
//! ## Example
//!
//! ```rust,ignore
//! use packrat_core::{KindRegistry, World};
//!
//! let registry = KindRegistry::builder()
//!     .register::<Transform>()
//!     .register::<Health>()
//!     .build();
//! let mut world = World::new(registry);
//!
//! let hero = world.create();
//! world.attach(hero, Transform::new(4.0, 5.0));
//! world.remove(hero);
//! world.sync(); // removal lands here, after cleanup hooks
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;

pub use ecs::{
    Component, Entity, Ident, Kind, KindInfo, KindRegistry, KindRegistryBuilder, KindStore,
    PackedStorage, Record, System, World, MAX_KINDS, MAX_SLOTS,
};
