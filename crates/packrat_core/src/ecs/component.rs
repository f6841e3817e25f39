//! # Component Kinds
//!
//! Components are plain data records composed onto entities at runtime.
//! Every component type (a *kind*) is assigned a small dense index at build
//! time; the index sizes the store's per-kind arrays and drives every
//! "for each kind, in order" fan-out.

use super::ident::Ident;
use super::storage::Record;

/// Hard upper bound on the number of registered component kinds.
pub const MAX_KINDS: usize = 16;

/// Dense index of a registered component kind.
///
/// Indices run 0..K-1 in registration order and are assigned once, in the
/// component type's declaration; [`KindRegistry`](super::registry::KindRegistry)
/// validates the assignment at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Kind(u8);

impl Kind {
    /// Creates a kind index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`MAX_KINDS`].
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < MAX_KINDS, "kind index out of range");
        Self(index)
    }

    /// Returns the dense index as a usize, for array addressing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contract a component kind presents to the store.
///
/// A component is an opaque, movable record: the store never inspects the
/// payload beyond the identifier and owner stamps it manages itself. The
/// `Default` value is the kind's sentinel instance — what fallback
/// accessors hand out when a kind is absent.
pub trait Component: Record + Clone + Send + Sync + 'static {
    /// The kind index assigned to this component type.
    const KIND: Kind;

    /// Stable human-readable kind name, used in logs and debug reports.
    const NAME: &'static str;

    /// Returns the identifier of the owning entity.
    fn owner(&self) -> Ident;

    /// Stamps the owning entity's identifier. Called by the store on
    /// insertion; not intended for callers.
    fn bind_owner(&mut self, owner: Ident);

    /// Renders the payload as a human-readable debug string.
    fn describe(&self) -> String;
}
