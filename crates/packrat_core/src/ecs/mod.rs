//! # Entity Component Storage
//!
//! A packed object-storage engine: entities are composed at runtime from a
//! fixed set of component kinds, each kind stored densely for fast bulk
//! iteration.
//!
//! ## Design
//!
//! - Each kind (and the entities themselves) lives in a generational slot
//!   map: O(1) insert, O(1) remove with swap compaction, stale-identifier
//!   rejection via generation tags
//! - Identifier 0 is reserved; invalid accesses degrade to a sentinel
//!   record instead of failing
//! - Removal is two-phase: requests queue until `World::sync`, so in-flight
//!   iteration and interested systems see objects before they go

mod component;
mod entity;
mod ident;
mod registry;
mod storage;
mod system;
mod world;

pub use component::{Component, Kind, MAX_KINDS};
pub use entity::Entity;
pub use ident::{Ident, GENERATION_STEP, INDEX_BITS, INDEX_MASK};
pub use registry::{KindInfo, KindRegistry, KindRegistryBuilder, KindStore};
pub use storage::{PackedStorage, Record, MAX_SLOTS};
pub use system::System;
pub use world::World;
