//! # Kind Registry
//!
//! The ordered, build-time-fixed list of component kinds a store knows
//! about. The registry is built once at startup from explicit
//! registrations; it validates that every kind's declared index matches
//! its registration position, so the "small dense index per kind" property
//! holds without any hidden global counter.
//!
//! Per-kind fan-out (storage construction, removal-queue flushing, debug
//! reporting, system interest tests) iterates this list and talks to each
//! kind's storage through the type-erased [`KindStore`] facade.

use std::any::{Any, TypeId};

use super::component::{Component, Kind, MAX_KINDS};
use super::ident::Ident;
use super::storage::PackedStorage;

/// Type-erased facade a kind's packed storage presents to the store.
///
/// Everything the store does generically — teardown fan-out, queue
/// flushing, debug reporting — goes through this trait; typed access
/// recovers the concrete storage via `as_any`.
pub trait KindStore {
    /// Checks whether `id` names a live component in this storage.
    fn has(&self, id: Ident) -> bool;

    /// Returns the owning entity of the component `id`.
    ///
    /// Same contract as `PackedStorage::lookup`: the caller must have
    /// established `has(id)`.
    fn owner_of(&self, id: Ident) -> Ident;

    /// Releases the component's slot immediately.
    fn release(&mut self, id: Ident);

    /// Number of live components, excluding the sentinel.
    fn len(&self) -> usize;

    /// True when no live components are bound.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes reserved upfront for the dense record array.
    fn reserved_bytes(&self) -> usize;

    /// Renders the component's debug string, or `None` if `id` is not
    /// live here.
    fn describe(&self, id: Ident) -> Option<String>;

    /// Upcast for typed downcasting to the concrete storage.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting to the concrete storage.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> KindStore for PackedStorage<C> {
    fn has(&self, id: Ident) -> bool {
        PackedStorage::has(self, id)
    }

    fn owner_of(&self, id: Ident) -> Ident {
        self.lookup(id).owner()
    }

    fn release(&mut self, id: Ident) {
        self.remove(id);
    }

    fn len(&self) -> usize {
        PackedStorage::len(self)
    }

    fn reserved_bytes(&self) -> usize {
        PackedStorage::reserved_bytes(self)
    }

    fn describe(&self, id: Ident) -> Option<String> {
        if PackedStorage::has(self, id) {
            Some(self.lookup(id).describe())
        } else {
            None
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Descriptor of one registered component kind.
pub struct KindInfo {
    kind: Kind,
    name: &'static str,
    type_id: TypeId,
    new_store: fn(usize) -> Box<dyn KindStore>,
}

impl KindInfo {
    /// The kind's dense index.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The kind's stable name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Constructs this kind's packed storage with the given slot capacity,
    /// sentinel installed.
    #[must_use]
    pub fn new_store(&self, capacity: usize) -> Box<dyn KindStore> {
        (self.new_store)(capacity)
    }
}

fn new_kind_store<C: Component>(capacity: usize) -> Box<dyn KindStore> {
    Box::new(PackedStorage::<C>::with_capacity(capacity))
}

/// The ordered list of component kinds a store is built over.
pub struct KindRegistry {
    kinds: Box<[KindInfo]>,
}

impl KindRegistry {
    /// Starts building a registry. Kinds must be registered in their
    /// declared index order.
    #[must_use]
    pub fn builder() -> KindRegistryBuilder {
        KindRegistryBuilder { kinds: Vec::new() }
    }

    /// Number of registered kinds.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True when no kinds are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// The descriptor at a kind index.
    #[inline]
    #[must_use]
    pub fn info(&self, kind: Kind) -> &KindInfo {
        &self.kinds[kind.index()]
    }

    /// Iterates the descriptors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &KindInfo> {
        self.kinds.iter()
    }

    /// Iterates the registered kind indices in order.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.iter().map(KindInfo::kind)
    }
}

/// Accumulates kind registrations for [`KindRegistry`].
pub struct KindRegistryBuilder {
    kinds: Vec<KindInfo>,
}

impl KindRegistryBuilder {
    /// Registers the next component kind.
    ///
    /// # Panics
    ///
    /// Panics when the kind's declared index does not match its
    /// registration position, when the type is registered twice, or when
    /// more than [`MAX_KINDS`] kinds are registered. All three are
    /// build-time configuration errors.
    #[must_use]
    pub fn register<C: Component>(mut self) -> Self {
        assert!(
            self.kinds.len() < MAX_KINDS,
            "too many component kinds: the registry holds at most {MAX_KINDS}"
        );
        assert!(
            !self.kinds.iter().any(|info| info.type_id == TypeId::of::<C>()),
            "component kind {} is registered twice",
            C::NAME
        );
        assert!(
            C::KIND.index() == self.kinds.len(),
            "component kind {} declares index {} but is registered at position {}",
            C::NAME,
            C::KIND.index(),
            self.kinds.len()
        );

        self.kinds.push(KindInfo {
            kind: C::KIND,
            name: C::NAME,
            type_id: TypeId::of::<C>(),
            new_store: new_kind_store::<C>,
        });
        self
    }

    /// Finalizes the registry.
    #[must_use]
    pub fn build(self) -> KindRegistry {
        KindRegistry {
            kinds: self.kinds.into_boxed_slice(),
        }
    }
}
