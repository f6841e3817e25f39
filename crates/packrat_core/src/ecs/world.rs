//! # World
//!
//! The entity/component store: one packed storage for entities, one per
//! registered component kind, and the two-phase mutation protocol that
//! ties them together.
//!
//! Creation and attachment are immediate. Removal is a request: entity and
//! component removals are queued and take effect only inside [`World::sync`],
//! which notifies interested systems before anything is deallocated. Between
//! the request and the sync, queued objects remain fully live and iterable.
//!
//! External code holds identifiers, never references across mutations:
//! any removal may relocate live records through swap compaction.

use std::fmt::Write as _;
use std::mem;

use tracing::{debug, trace};

use super::component::{Component, Kind};
use super::entity::Entity;
use super::ident::Ident;
use super::registry::{KindRegistry, KindStore};
use super::storage::{PackedStorage, MAX_SLOTS};
use super::system::System;

/// Recovers the concrete storage for a component kind.
///
/// Free functions rather than methods so the borrow stays on the store
/// list alone and the entity storage can be touched alongside.
fn typed<C: Component>(stores: &[Box<dyn KindStore>]) -> &PackedStorage<C> {
    let Some(store) = stores.get(C::KIND.index()) else {
        panic!("component kind {} is not registered", C::NAME);
    };
    match store.as_any().downcast_ref::<PackedStorage<C>>() {
        Some(typed) => typed,
        None => panic!("component kind {} does not match its registry slot", C::NAME),
    }
}

fn typed_mut<C: Component>(stores: &mut [Box<dyn KindStore>]) -> &mut PackedStorage<C> {
    let Some(store) = stores.get_mut(C::KIND.index()) else {
        panic!("component kind {} is not registered", C::NAME);
    };
    match store.as_any_mut().downcast_mut::<PackedStorage<C>>() {
        Some(typed) => typed,
        None => panic!("component kind {} does not match its registry slot", C::NAME),
    }
}

/// The entity/component store.
///
/// Owns all backing storage exclusively. Entities and components are
/// referenced externally only by [`Ident`]; fallback accessors return the
/// reserved sentinel instance (identifier 0) on any invalid access, so
/// reads never fail — callers needing correctness gate on the `has`
/// accessors first.
pub struct World {
    registry: KindRegistry,
    entities: PackedStorage<Entity>,
    components: Vec<Box<dyn KindStore>>,
    systems: Vec<Box<dyn System>>,
    dead_entities: Vec<Ident>,
    dead_components: Vec<Vec<Ident>>,
}

impl World {
    /// Creates a store over the registered kinds with the default
    /// capacity of [`MAX_SLOTS`] slots per storage.
    #[must_use]
    pub fn new(registry: KindRegistry) -> Self {
        Self::with_capacity(registry, MAX_SLOTS)
    }

    /// Creates a store with an explicit per-storage slot capacity.
    ///
    /// All backing memory is reserved here; nothing grows afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is outside `2..=MAX_SLOTS`.
    #[must_use]
    pub fn with_capacity(registry: KindRegistry, capacity: usize) -> Self {
        let entities: PackedStorage<Entity> = PackedStorage::with_capacity(capacity);
        debug!(
            kib = entities.reserved_bytes() / 1024,
            "reserving entity storage"
        );

        let mut components = Vec::with_capacity(registry.len());
        for info in registry.iter() {
            let store = info.new_store(capacity);
            debug!(
                kind = info.name(),
                kib = store.reserved_bytes() / 1024,
                "reserving component storage"
            );
            components.push(store);
        }
        let dead_components = registry.iter().map(|_| Vec::new()).collect();

        Self {
            registry,
            entities,
            components,
            systems: Vec::new(),
            dead_entities: Vec::new(),
            dead_components,
        }
    }

    /// The kind registry this store was built over.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Per-storage slot capacity, sentinel included.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates a new entity immediately and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics only on capacity exhaustion.
    pub fn create(&mut self) -> Ident {
        self.entities.add(Entity::default())
    }

    /// Queues an entity for removal.
    ///
    /// The entity and its components stay fully live until the next
    /// [`sync`](Self::sync). Dead or invalid identifiers are ignored.
    pub fn remove(&mut self, id: Ident) {
        if self.has(id) {
            self.dead_entities.push(id);
        }
    }

    /// Checks whether `id` names a live entity. The sentinel identifier
    /// is never live at this level.
    #[inline]
    #[must_use]
    pub fn has(&self, id: Ident) -> bool {
        id.is_valid() && self.entities.has(id)
    }

    /// Returns the entity record for `id`, or the sentinel entity when
    /// `id` is dead, stale, or invalid.
    ///
    /// Do not retain the reference across mutations; records relocate.
    #[must_use]
    pub fn entity(&self, id: Ident) -> &Entity {
        if self.entities.has(id) {
            self.entities.lookup(id)
        } else {
            self.entities.sentinel()
        }
    }

    /// Iterates all live entities.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    // =========================================================================
    // Component operations
    // =========================================================================

    /// Attaches a component to an entity, returning the stored instance.
    ///
    /// If the entity already carries the kind, the existing instance's
    /// payload is overwritten in place — identifier and owner stamp are
    /// preserved, so re-adding is idempotent with respect to identity.
    /// Attaching to a dead entity degrades to the kind's sentinel instance
    /// and stores nothing.
    ///
    /// The returned reference is valid until the next store mutation.
    pub fn attach<C: Component>(&mut self, entity: Ident, value: C) -> &mut C {
        if !self.has(entity) {
            return typed_mut::<C>(&mut self.components).sentinel_mut();
        }
        let kind = C::KIND;
        if self.entities.lookup(entity).has_kind(kind) {
            let component = self.entities.lookup(entity).component_id(kind);
            let slot = typed_mut::<C>(&mut self.components).lookup_mut(component);
            let id = slot.id();
            let owner = slot.owner();
            *slot = value;
            slot.bind_id(id);
            slot.bind_owner(owner);
            slot
        } else {
            let mut value = value;
            value.bind_owner(entity);
            let component = typed_mut::<C>(&mut self.components).add(value);
            self.entities.lookup_mut(entity).set_kind(kind, component);
            typed_mut::<C>(&mut self.components).lookup_mut(component)
        }
    }

    /// Returns the entity's component of kind `C`, or the kind's sentinel
    /// instance (identifier 0) when absent.
    ///
    /// Never fails; gate on [`has_component`](Self::has_component) when
    /// absence matters.
    #[must_use]
    pub fn component<C: Component>(&self, entity: Ident) -> &C {
        let record = self.entity(entity);
        let store = typed::<C>(&self.components);
        if record.has_kind(C::KIND) {
            store.lookup(record.component_id(C::KIND))
        } else {
            store.sentinel()
        }
    }

    /// Mutable variant of [`component`](Self::component). Writes through a
    /// sentinel fallback land on the sentinel instance and are visible to
    /// every later fallback read — a documented hazard of the silent
    /// degrade, not an error.
    pub fn component_mut<C: Component>(&mut self, entity: Ident) -> &mut C {
        let record = self.entity(entity);
        let component = if record.has_kind(C::KIND) {
            Some(record.component_id(C::KIND))
        } else {
            None
        };
        let store = typed_mut::<C>(&mut self.components);
        match component {
            Some(id) => store.lookup_mut(id),
            None => store.sentinel_mut(),
        }
    }

    /// O(1) presence check for kind `C` on an entity.
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: Ident) -> bool {
        self.entity(entity).has_kind(C::KIND)
    }

    /// Queues the entity's component of kind `C` for removal.
    ///
    /// No visible effect until [`sync`](Self::sync): presence and payload
    /// stay readable, and a re-attach before the sync overwrites the
    /// still-live instance (the removal still occurs).
    pub fn detach<C: Component>(&mut self, entity: Ident) {
        self.detach_kind(C::KIND, entity);
    }

    /// Removes the entity's component of kind `C` within this call.
    ///
    /// This is the entity-teardown path; deferred [`detach`](Self::detach)
    /// is the default for everything else.
    pub fn detach_now<C: Component>(&mut self, entity: Ident) {
        self.detach_kind_now(C::KIND, entity);
    }

    /// Queues every component the entity carries for removal, in registry
    /// order.
    pub fn detach_all(&mut self, entity: Ident) {
        for index in 0..self.registry.len() {
            self.detach_kind(Kind::new(index as u8), entity);
        }
    }

    /// Immediately removes every component the entity carries, in registry
    /// order.
    pub fn detach_all_now(&mut self, entity: Ident) {
        for index in 0..self.registry.len() {
            self.detach_kind_now(Kind::new(index as u8), entity);
        }
    }

    fn detach_kind(&mut self, kind: Kind, entity: Ident) {
        if !self.has(entity) {
            return;
        }
        let record = self.entities.lookup(entity);
        if record.has_kind(kind) {
            let component = record.component_id(kind);
            self.dead_components[kind.index()].push(component);
        }
    }

    fn detach_kind_now(&mut self, kind: Kind, entity: Ident) {
        if !self.has(entity) {
            return;
        }
        let record = self.entities.lookup_mut(entity);
        if !record.has_kind(kind) {
            return;
        }
        let component = record.component_id(kind);
        record.clear_kind(kind);
        self.components[kind.index()].release(component);
    }

    /// Iterates all live components of kind `C`.
    pub fn components<C: Component>(&self) -> impl Iterator<Item = &C> {
        typed::<C>(&self.components).iter()
    }

    /// Mutable iteration over all live components of kind `C`.
    pub fn components_mut<C: Component>(&mut self) -> impl Iterator<Item = &mut C> {
        typed_mut::<C>(&mut self.components).iter_mut()
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Registers a system. Systems are notified and ticked in
    /// registration order.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// Offers a composed entity to every registered system whose interest
    /// matches one of its carried kinds.
    ///
    /// Attachment is caller choreography: invoke this after the entity's
    /// initial components are in place. Detachment, by contrast, is
    /// automatic via [`sync`](Self::sync).
    pub fn attach_to_systems(&mut self, entity: Ident) {
        if !self.has(entity) {
            return;
        }
        let mut systems = mem::take(&mut self.systems);
        for system in &mut systems {
            let record = self.entities.lookup(entity);
            let interested = self
                .registry
                .kinds()
                .any(|kind| record.has_kind(kind) && system.interested_in(kind));
            if interested {
                system.setup(&*self, record);
            }
        }
        self.systems = systems;
    }

    /// Runs every system's per-tick update, in registration order.
    ///
    /// No visibility guarantee is given between systems within one pass;
    /// each reads and writes the store independently.
    pub fn update(&mut self, dt: f32) {
        let mut systems = mem::take(&mut self.systems);
        for system in &mut systems {
            system.update(self, dt);
        }
        // A system may have registered further systems during its tick;
        // they run from the next pass onwards.
        let added = mem::take(&mut self.systems);
        self.systems = systems;
        self.systems.extend(added);
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Drains the removal queues. The sole point where queued removals
    /// take effect, in three ordered phases:
    ///
    /// 1. Each still-live queued entity: interested systems receive
    ///    `cleanup` once per carried interested kind while everything is
    ///    still live, then the entity's components are removed
    ///    immediately, its record cleared, and its slot released.
    /// 2. Each kind's component queue is flushed in registry order:
    ///    still-live queued components clear their owner's presence flag
    ///    and release their slot.
    /// 3. All queues end the call empty.
    ///
    /// Only one generation of queued work is drained per call; removals
    /// queued during the pass wait for the next one.
    pub fn sync(&mut self) {
        // Phase 1: queued entities.
        let queued = mem::take(&mut self.dead_entities);
        let mut systems = mem::take(&mut self.systems);
        let mut entities_dropped = 0_usize;
        for id in queued {
            if !self.has(id) {
                continue;
            }
            for system in &mut systems {
                for kind in self.registry.kinds() {
                    let record = self.entities.lookup(id);
                    if record.has_kind(kind) && system.interested_in(kind) {
                        system.cleanup(&*self, record);
                    }
                }
            }
            self.detach_all_now(id);
            self.entities.lookup_mut(id).clear();
            self.entities.remove(id);
            entities_dropped += 1;
        }
        self.systems = systems;

        // Phase 2: queued components, registry order.
        let mut components_dropped = 0_usize;
        for index in 0..self.registry.len() {
            let queue = mem::take(&mut self.dead_components[index]);
            for component in queue {
                if !self.components[index].has(component) {
                    continue;
                }
                let owner = self.components[index].owner_of(component);
                if self.has(owner) {
                    let kind = Kind::new(index as u8);
                    let record = self.entities.lookup_mut(owner);
                    if record.component_id(kind) == component {
                        record.clear_kind(kind);
                    }
                }
                self.components[index].release(component);
                components_dropped += 1;
            }
        }

        trace!(
            entities = entities_dropped,
            components = components_dropped,
            "sync drained removal queues"
        );
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Renders per-kind live counts and reserved storage sizes. A text
    /// log for humans, not a contract surface.
    #[must_use]
    pub fn debug_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "entity store");
        let _ = writeln!(out, "------------------------");
        let _ = writeln!(
            out,
            "{} entities ({} KiB)",
            self.entities.len(),
            self.entities.reserved_bytes() / 1024
        );
        for info in self.registry.iter() {
            let store = &self.components[info.kind().index()];
            let _ = writeln!(
                out,
                "#{}: {} ({} KiB)",
                info.name(),
                store.len(),
                store.reserved_bytes() / 1024
            );
        }
        let _ = writeln!(out, "------------------------");
        out
    }

    /// Renders an entity and each component it carries, one debug line
    /// per kind in registry order.
    #[must_use]
    pub fn describe(&self, entity: Ident) -> String {
        let record = self.entity(entity);
        let mut out = format!("entity {{id: {}}}\n", record.id());
        for info in self.registry.iter() {
            if !record.has_kind(info.kind()) {
                continue;
            }
            let store = &self.components[info.kind().index()];
            if let Some(line) = store.describe(record.component_id(info.kind())) {
                let _ = writeln!(out, "- {line}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::storage::Record;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, Default)]
    struct Px {
        value: f32,
        id: Ident,
        owner: Ident,
    }

    impl Px {
        fn new(value: f32) -> Self {
            Self {
                value,
                ..Self::default()
            }
        }
    }

    impl Record for Px {
        fn id(&self) -> Ident {
            self.id
        }
        fn bind_id(&mut self, id: Ident) {
            self.id = id;
        }
    }

    impl Component for Px {
        const KIND: Kind = Kind::new(0);
        const NAME: &'static str = "px";
        fn owner(&self) -> Ident {
            self.owner
        }
        fn bind_owner(&mut self, owner: Ident) {
            self.owner = owner;
        }
        fn describe(&self) -> String {
            format!("px {{value: {}}}", self.value)
        }
    }

    #[derive(Clone, Debug, Default)]
    struct Tag {
        label: u32,
        id: Ident,
        owner: Ident,
    }

    impl Record for Tag {
        fn id(&self) -> Ident {
            self.id
        }
        fn bind_id(&mut self, id: Ident) {
            self.id = id;
        }
    }

    impl Component for Tag {
        const KIND: Kind = Kind::new(1);
        const NAME: &'static str = "tag";
        fn owner(&self) -> Ident {
            self.owner
        }
        fn bind_owner(&mut self, owner: Ident) {
            self.owner = owner;
        }
        fn describe(&self) -> String {
            format!("tag {{label: {}}}", self.label)
        }
    }

    fn world() -> World {
        let registry = KindRegistry::builder()
            .register::<Px>()
            .register::<Tag>()
            .build();
        World::with_capacity(registry, 64)
    }

    #[derive(Default)]
    struct RecorderLog {
        events: Vec<String>,
    }

    struct Recorder {
        tag: &'static str,
        interests: Vec<Kind>,
        log: Rc<RefCell<RecorderLog>>,
    }

    impl System for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn interested_in(&self, kind: Kind) -> bool {
            self.interests.contains(&kind)
        }

        fn setup(&mut self, _world: &World, entity: &Entity) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} setup {}", self.tag, entity.id()));
        }

        fn cleanup(&mut self, world: &World, entity: &Entity) {
            // Everything the entity carries must still be live here.
            let px_live = world.has_component::<Px>(entity.id());
            self.log
                .borrow_mut()
                .events
                .push(format!("{} cleanup {} px_live={}", self.tag, entity.id(), px_live));
        }

        fn update(&mut self, _world: &mut World, _dt: f32) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} update", self.tag));
        }
    }

    #[test]
    fn test_create_is_immediate_and_remove_is_deferred() {
        let mut world = world();
        let e = world.create();
        assert!(world.has(e));
        assert!(e.is_valid());
        assert_eq!(world.entity_count(), 1);

        world.remove(e);
        assert!(world.has(e), "removal must not take effect before sync");
        world.sync();
        assert!(!world.has(e));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_stale_entity_identifier_stays_dead_after_reuse() {
        let mut world = world();
        let ids: Vec<Ident> = (0..3).map(|_| world.create()).collect();
        world.remove(ids[1]);
        world.sync();

        // Churn allocations; the stale identifier must stay dead even as
        // slots recycle.
        for _ in 0..8 {
            let _ = world.create();
        }
        assert!(!world.has(ids[1]));
        assert!(world.has(ids[0]));
        assert!(world.has(ids[2]));
    }

    #[test]
    fn test_attach_and_sentinel_fallback() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(4.0));

        assert!(world.has_component::<Px>(e));
        assert!(!world.has_component::<Tag>(e));
        assert!((world.component::<Px>(e).value - 4.0).abs() < f32::EPSILON);

        // Absent kind degrades to the sentinel instance, identifier 0.
        let tag = world.component::<Tag>(e);
        assert!(tag.id().is_none());

        // Same for a dead entity.
        let px = world.component::<Px>(Ident::new(60, 3));
        assert!(px.id().is_none());
    }

    #[test]
    fn test_re_attach_is_idempotent_on_identity() {
        let mut world = world();
        let e = world.create();
        let first = world.attach(e, Px::new(1.0));
        let id = first.id();
        let owner = first.owner();
        assert_eq!(owner, e);

        let second = world.attach(e, Px::new(2.0));
        assert_eq!(second.id(), id, "re-add must not mint a new identifier");
        assert_eq!(second.owner(), owner);
        assert!((second.value - 2.0).abs() < f32::EPSILON);
        assert_eq!(world.components::<Px>().count(), 1);
    }

    #[test]
    fn test_attach_to_dead_entity_stores_nothing() {
        let mut world = world();
        let e = world.create();
        world.remove(e);
        world.sync();

        let slot = world.attach(e, Px::new(9.0));
        assert!(slot.id().is_none(), "degrades to the sentinel instance");
        assert_eq!(world.components::<Px>().count(), 0);
    }

    #[test]
    fn test_component_removal_is_deferred() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(7.0));

        world.detach::<Px>(e);
        assert!(world.has_component::<Px>(e), "visible until sync");
        assert!((world.component::<Px>(e).value - 7.0).abs() < f32::EPSILON);

        world.sync();
        assert!(!world.has_component::<Px>(e));
        assert!(world.component::<Px>(e).id().is_none());
        assert_eq!(world.components::<Px>().count(), 0);
        assert!(world.has(e), "the entity itself survives");
    }

    #[test]
    fn test_last_write_before_sync_wins_and_removal_still_occurs() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(1.0));
        world.detach::<Px>(e);

        // Re-attach while the removal is pending: overwrites the live
        // instance in place.
        world.attach(e, Px::new(5.0));
        assert!((world.component::<Px>(e).value - 5.0).abs() < f32::EPSILON);

        world.sync();
        assert!(!world.has_component::<Px>(e), "queued removal still lands");
    }

    #[test]
    fn test_double_detach_is_harmless() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(1.0));
        world.detach::<Px>(e);
        world.detach::<Px>(e);
        world.sync();
        assert!(!world.has_component::<Px>(e));
        assert_eq!(world.components::<Px>().count(), 0);
    }

    #[test]
    fn test_entity_teardown_removes_all_components() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(1.0));
        let tag_id = world.attach(e, Tag::default()).id();
        let px_id = world.component::<Px>(e).id();

        world.remove(e);
        // Everything remains readable until the sync.
        assert!(world.has_component::<Px>(e));
        assert!(world.has_component::<Tag>(e));

        world.sync();
        assert!(!world.has(e));
        assert_eq!(world.components::<Px>().count(), 0);
        assert_eq!(world.components::<Tag>().count(), 0);
        assert!(world.component::<Px>(e).id().is_none());
        assert!(px_id.is_valid() && tag_id.is_valid());
    }

    #[test]
    fn test_density_after_churn_and_sync() {
        let mut world = world();
        let ids: Vec<Ident> = (0..6)
            .map(|i| {
                let e = world.create();
                world.attach(e, Px::new(i as f32));
                e
            })
            .collect();
        for e in &ids[..3] {
            world.remove(*e);
        }
        world.sync();

        assert_eq!(world.entity_count(), 3);
        assert_eq!(world.components::<Px>().count(), 3);
        for px in world.components::<Px>() {
            assert!(world.has(px.owner()));
            assert_eq!(world.component::<Px>(px.owner()).id(), px.id());
        }
    }

    #[test]
    fn test_cleanup_fires_before_deallocation_once_per_kind() {
        let mut world = world();
        let log = Rc::new(RefCell::new(RecorderLog::default()));
        world.add_system(Box::new(Recorder {
            tag: "a",
            interests: vec![Px::KIND],
            log: Rc::clone(&log),
        }));

        let e = world.create();
        world.attach(e, Px::new(1.0));
        world.remove(e);
        assert!(log.borrow().events.is_empty(), "nothing fires before sync");

        world.sync();
        let events = log.borrow().events.clone();
        assert_eq!(events.len(), 1, "exactly once for one interested kind");
        assert!(events[0].contains("px_live=true"), "component still live in hook");
        assert!(!world.has_component::<Px>(e), "gone after sync returns");
    }

    #[test]
    fn test_cleanup_multiplicity_and_interest_filtering() {
        let mut world = world();
        let log = Rc::new(RefCell::new(RecorderLog::default()));
        // Interested in both kinds.
        world.add_system(Box::new(Recorder {
            tag: "both",
            interests: vec![Px::KIND, Tag::KIND],
            log: Rc::clone(&log),
        }));
        // Interested in neither.
        world.add_system(Box::new(Recorder {
            tag: "none",
            interests: vec![],
            log: Rc::clone(&log),
        }));

        let e = world.create();
        world.attach(e, Px::new(1.0));
        world.attach(e, Tag::default());
        world.remove(e);
        world.sync();

        let events = log.borrow().events.clone();
        assert_eq!(
            events.len(),
            2,
            "once per carried interested kind, uninterested system silent"
        );
        assert!(events.iter().all(|line| line.starts_with("both cleanup")));
    }

    #[test]
    fn test_setup_is_manual_and_interest_filtered() {
        let mut world = world();
        let log = Rc::new(RefCell::new(RecorderLog::default()));
        world.add_system(Box::new(Recorder {
            tag: "a",
            interests: vec![Px::KIND],
            log: Rc::clone(&log),
        }));
        world.add_system(Box::new(Recorder {
            tag: "b",
            interests: vec![Tag::KIND],
            log: Rc::clone(&log),
        }));

        let e = world.create();
        world.attach(e, Px::new(1.0));
        assert!(log.borrow().events.is_empty(), "attach never fires setup");

        world.attach_to_systems(e);
        let events = log.borrow().events.clone();
        assert_eq!(events.len(), 1, "only the interested system is offered");
        assert!(events[0].starts_with("a setup"));
    }

    #[test]
    fn test_update_runs_in_registration_order() {
        let mut world = world();
        let log = Rc::new(RefCell::new(RecorderLog::default()));
        for tag in ["first", "second"] {
            world.add_system(Box::new(Recorder {
                tag,
                interests: vec![],
                log: Rc::clone(&log),
            }));
        }
        world.update(0.25);
        let events = log.borrow().events.clone();
        assert_eq!(events, vec!["first update", "second update"]);
    }

    #[test]
    fn test_sync_drains_only_what_was_queued_before_it() {
        let mut world = world();
        let e1 = world.create();
        let e2 = world.create();
        world.attach(e1, Px::new(1.0));
        world.attach(e2, Px::new(2.0));

        world.remove(e1);
        world.sync();
        assert!(!world.has(e1));
        assert!(world.has(e2), "unqueued entities are untouched");

        world.remove(e2);
        world.sync();
        assert!(!world.has(e2));
    }

    #[test]
    fn test_debug_report_and_describe() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(1.5));

        let report = world.debug_report();
        assert!(report.contains("1 entities"));
        assert!(report.contains("#px: 1"));
        assert!(report.contains("#tag: 0"));

        let described = world.describe(e);
        assert!(described.contains("px {value: 1.5}"));
        assert!(!described.contains("tag {"));

        // Describing a dead identifier renders the sentinel entity.
        let described = world.describe(Ident::new(17, 4));
        assert!(described.starts_with("entity {id: 0v0}"));
    }

    #[test]
    fn test_detach_all_defers_and_detach_all_now_does_not() {
        let mut world = world();
        let e = world.create();
        world.attach(e, Px::new(1.0));
        world.attach(e, Tag { label: 3, ..Tag::default() });

        world.detach_all(e);
        assert!(world.has_component::<Px>(e));
        assert!(world.has_component::<Tag>(e));
        world.sync();
        assert!(!world.has_component::<Px>(e));
        assert!(!world.has_component::<Tag>(e));

        world.attach(e, Px::new(2.0));
        world.detach_all_now(e);
        assert!(!world.has_component::<Px>(e));
        assert_eq!(world.components::<Px>().count(), 0);
    }
}
