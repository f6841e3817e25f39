//! # Identifiers
//!
//! Every live object in a packed storage is named by an [`Ident`]:
//! - Lower 16 bits: slot index into the storage's slot table
//! - Upper 16 bits: generation counter for detecting stale identifiers
//!
//! Identifier `0` is reserved. Every storage binds it to a sentinel record
//! at construction, so `Ident::INVALID` always names a safe, recognizable
//! "nothing" rather than a dangling value.

/// Opaque identifier for a record held in a packed storage.
///
/// The value is split into two parts:
/// - Lower 16 bits: slot index (0 to 65535)
/// - Upper 16 bits: generation, bumped every time the slot is rebound
///
/// A stale identifier (one whose slot has since been freed or reused) fails
/// the generation comparison and is rejected by `has` checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ident(u32);

/// Number of bits used for the slot index portion of an identifier.
pub const INDEX_BITS: u32 = 16;

/// Mask extracting the slot index from a raw identifier value.
pub const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Amount added to a raw identifier to advance its generation by one.
///
/// The fixed step keeps the slot index untouched while invalidating every
/// outstanding copy of the previous identifier.
pub const GENERATION_STEP: u32 = 1 << INDEX_BITS;

impl Ident {
    /// The reserved invalid identifier. Names the sentinel record of every
    /// storage; never handed out for a live object.
    pub const INVALID: Self = Self(0);

    /// Creates an identifier from a slot index and a generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation & INDEX_MASK) << INDEX_BITS) | (index & INDEX_MASK))
    }

    /// Returns the slot index portion of this identifier.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    /// Returns the generation portion of this identifier.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.0 >> INDEX_BITS
    }

    /// Returns the identifier naming the same slot at the next generation.
    #[inline]
    #[must_use]
    pub const fn bumped(self) -> Self {
        Self(self.0.wrapping_add(GENERATION_STEP))
    }

    /// Checks whether this identifier may name a live object.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Checks whether this is the reserved invalid identifier.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw packed value, for diagnostics.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}
