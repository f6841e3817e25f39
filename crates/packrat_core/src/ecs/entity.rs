//! # Entities
//!
//! An entity is an identifier plus per-kind bookkeeping: which component
//! kinds are present, and the identifier of each present instance. The
//! payloads themselves live in the per-kind packed storages; the entity
//! record is pure composition state.

use super::component::{Kind, MAX_KINDS};
use super::ident::Ident;
use super::storage::Record;

/// Per-entity composition record.
///
/// Owned by the store's entity storage; external code refers to entities
/// by identifier only. The default value is the invalid sentinel entity:
/// identifier 0, no kinds present.
#[derive(Clone, Copy, Debug, Default)]
pub struct Entity {
    id: Ident,
    present: [bool; MAX_KINDS],
    components: [Ident; MAX_KINDS],
}

impl Entity {
    /// The entity's identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> Ident {
        self.id
    }

    /// Checks whether this record names a live entity rather than the
    /// sentinel.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// O(1) presence check for a component kind.
    #[inline]
    #[must_use]
    pub const fn has_kind(&self, kind: Kind) -> bool {
        self.present[kind.index()]
    }

    /// Identifier of the present component of `kind`, or `Ident::INVALID`
    /// when the kind is absent.
    #[inline]
    #[must_use]
    pub const fn component_id(&self, kind: Kind) -> Ident {
        self.components[kind.index()]
    }

    /// Records a component attachment. Store-internal.
    pub(crate) fn set_kind(&mut self, kind: Kind, component: Ident) {
        self.present[kind.index()] = true;
        self.components[kind.index()] = component;
    }

    /// Clears a component attachment. Store-internal.
    pub(crate) fn clear_kind(&mut self, kind: Kind) {
        self.present[kind.index()] = false;
        self.components[kind.index()] = Ident::INVALID;
    }

    /// Resets the record to the sentinel state. Store-internal, used on
    /// entity teardown.
    pub(crate) fn clear(&mut self) {
        self.id = Ident::INVALID;
        self.present = [false; MAX_KINDS];
        self.components = [Ident::INVALID; MAX_KINDS];
    }
}

impl Record for Entity {
    fn id(&self) -> Ident {
        self.id
    }

    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let entity = Entity::default();
        assert!(!entity.is_valid());
        assert_eq!(entity.id(), Ident::INVALID);
        for i in 0..MAX_KINDS {
            let kind = Kind::new(i as u8);
            assert!(!entity.has_kind(kind));
            assert!(entity.component_id(kind).is_none());
        }
    }

    #[test]
    fn test_kind_bookkeeping() {
        let mut entity = Entity::default();
        let kind = Kind::new(2);
        let component = Ident::new(9, 1);

        entity.set_kind(kind, component);
        assert!(entity.has_kind(kind));
        assert_eq!(entity.component_id(kind), component);
        assert!(!entity.has_kind(Kind::new(3)));

        entity.clear_kind(kind);
        assert!(!entity.has_kind(kind));
        assert!(entity.component_id(kind).is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut entity = Entity::default();
        entity.bind_id(Ident::new(4, 0));
        entity.set_kind(Kind::new(0), Ident::new(1, 0));
        entity.clear();
        assert!(!entity.is_valid());
        assert!(!entity.has_kind(Kind::new(0)));
    }
}
