//! # System Notification Protocol
//!
//! A system is an external observer registered with the store. It declares
//! interest in component kinds, reacts to entity teardown, and drives its
//! own per-tick logic over the store's typed views.
//!
//! Detachment is automatic: `cleanup` fires from inside `World::sync`,
//! once per interested system per entity per kind the entity still
//! carries, strictly before that kind's component is deallocated.
//! Attachment is manual: after composing an entity, the call site offers
//! it to the registered systems via `World::attach_to_systems`. The
//! asymmetry is deliberate and part of the protocol.

use super::component::Kind;
use super::entity::Entity;
use super::world::World;

/// An observer over the store's entities, driven by kind interest.
pub trait System {
    /// Stable system name, used in logs.
    fn name(&self) -> &'static str;

    /// Pure interest predicate over a kind index.
    fn interested_in(&self, kind: Kind) -> bool;

    /// Offered a freshly composed entity. Only invoked through
    /// `World::attach_to_systems` — never automatically on attach.
    fn setup(&mut self, _world: &World, _entity: &Entity) {}

    /// Invoked from `World::sync` while a torn-down entity's components
    /// are still live, once per carried kind this system is interested in.
    /// Must not expect removals it enqueues here to be processed within
    /// the same sync pass.
    fn cleanup(&mut self, _world: &World, _entity: &Entity) {}

    /// Per-tick update over the store. `dt` is the externally driven
    /// delta time in seconds.
    fn update(&mut self, world: &mut World, dt: f32);
}
