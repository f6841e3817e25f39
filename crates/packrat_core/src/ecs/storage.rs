//! # Packed Storage
//!
//! A generational slot map: stable identifiers over a dense, compacting
//! array of records.
//!
//! - The *dense array* holds every live record contiguously; position 0 is
//!   a reserved sentinel, positions 1.. hold live records in arbitrary
//!   order.
//! - The *slot table* maps the low bits of an identifier to the record's
//!   current dense position, and carries the generation used to reject
//!   stale identifiers.
//! - Freed slots are recycled through a FIFO free list, so the oldest-freed
//!   slot is rebound first and identifier reuse is delayed as long as
//!   possible.
//!
//! Insert, remove, and validity checks are all O(1); removal compacts by
//! swapping the dense tail into the vacated position.

use super::ident::Ident;

/// Maximum number of slots in a single storage, sentinel included.
///
/// Matches the 16-bit index portion of [`Ident`]; a storage can never be
/// built larger than this.
pub const MAX_SLOTS: usize = 1 << 16;

/// Terminator value for the intrusive free list.
const FREE_END: u32 = u32::MAX;

/// Contract for anything a [`PackedStorage`] can own.
///
/// The `Default` value doubles as the sentinel record installed at dense
/// position 0 and as the prototype for `add`. The storage stamps each
/// record with its identifier on insertion via `bind_id`.
pub trait Record: Default {
    /// Returns the identifier stamped on this record.
    fn id(&self) -> Ident;

    /// Stamps this record with its identifier. Called by the storage on
    /// insertion; not intended for callers.
    fn bind_id(&mut self, id: Ident);
}

/// One entry of the slot table.
#[derive(Clone, Copy, Debug)]
struct SlotEntry {
    /// The generation-tagged identifier currently (or next) issued for
    /// this slot.
    id: Ident,
    /// Dense position of the bound record, or `None` while the slot is on
    /// the free list.
    dense: Option<u32>,
    /// Next slot in the free list; `FREE_END` terminates the chain.
    next: u32,
}

/// A generational slot map over records of one type.
///
/// Capacity is fixed at construction and the slot table is allocated
/// upfront; exceeding capacity is a fatal precondition violation, not a
/// recoverable error.
///
/// # Access discipline
///
/// `lookup` does not re-check validity: callers must have established
/// `has(id)` first, or go through a wrapper that falls back to the
/// sentinel. Holding a `&T` across any removal is not possible here by
/// construction (the borrow checker forbids it), which is exactly the
/// point: removal may relocate any live record.
pub struct PackedStorage<T: Record> {
    /// Live records. Position 0 is the sentinel.
    dense: Vec<T>,
    /// Slot table, fully allocated at construction.
    slots: Box<[SlotEntry]>,
    /// Head of the FIFO free list (dequeue side).
    free_head: u32,
    /// Tail of the FIFO free list (enqueue side).
    free_tail: u32,
    /// Total slot count, sentinel included.
    capacity: usize,
}

impl<T: Record> PackedStorage<T> {
    /// Creates a storage with the default capacity of [`MAX_SLOTS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_SLOTS)
    }

    /// Creates a storage with an explicit slot count (sentinel included).
    ///
    /// Smaller capacities keep tests and benches cheap; the identifier
    /// layout caps the upper bound at [`MAX_SLOTS`].
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than 2 or greater than [`MAX_SLOTS`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            (2..=MAX_SLOTS).contains(&capacity),
            "storage capacity must be within 2..={MAX_SLOTS}, got {capacity}"
        );

        let slots = (0..capacity)
            .map(|i| SlotEntry {
                id: Ident::new(i as u32, 0),
                dense: None,
                next: if i + 1 < capacity { (i + 1) as u32 } else { FREE_END },
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let mut storage = Self {
            dense: Vec::with_capacity(capacity),
            slots,
            free_head: 0,
            free_tail: (capacity - 1) as u32,
            capacity,
        };

        // Slot 0 binds to the sentinel record and stays bound forever; the
        // reserved identifier 0 therefore always resolves to it.
        let sentinel = storage.add(T::default());
        debug_assert!(sentinel.is_none());

        storage
    }

    /// Inserts a record, binding it to the oldest free slot.
    ///
    /// The record is appended to the dense array and stamped with the
    /// slot's current generation-tagged identifier.
    ///
    /// # Panics
    ///
    /// Panics when the storage is full: capacity exhaustion is a
    /// configuration error, never a runtime path.
    pub fn add(&mut self, proto: T) -> Ident {
        assert!(
            self.dense.len() < self.capacity,
            "packed storage exhausted: all {} slots bound",
            self.capacity
        );

        let slot = self.free_head as usize;
        let entry = &mut self.slots[slot];
        self.free_head = entry.next;

        let id = entry.id;
        let pos = self.dense.len();
        entry.dense = Some(pos as u32);
        self.dense.push(proto);
        self.dense[pos].bind_id(id);
        id
    }

    /// Checks whether `id` names a live record.
    ///
    /// True iff the addressed slot's generation matches and the slot is
    /// bound to a dense position. Note that the sentinel's identifier
    /// (`Ident::INVALID`) is bound here; layers above re-screen it.
    #[inline]
    #[must_use]
    pub fn has(&self, id: Ident) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|entry| entry.id == id && entry.dense.is_some())
    }

    /// Returns the record bound to `id`.
    ///
    /// Callers must have established `has(id)`; looking up an unbound slot
    /// is a usage violation and panics.
    #[inline]
    #[must_use]
    pub fn lookup(&self, id: Ident) -> &T {
        let entry = &self.slots[id.index()];
        match entry.dense {
            Some(pos) => &self.dense[pos as usize],
            None => panic!("lookup on an unbound identifier {id}"),
        }
    }

    /// Mutable variant of [`lookup`](Self::lookup); same contract.
    #[inline]
    pub fn lookup_mut(&mut self, id: Ident) -> &mut T {
        let entry = &self.slots[id.index()];
        match entry.dense {
            Some(pos) => &mut self.dense[pos as usize],
            None => panic!("lookup on an unbound identifier {id}"),
        }
    }

    /// Returns the reserved sentinel record at dense position 0.
    #[inline]
    #[must_use]
    pub fn sentinel(&self) -> &T {
        &self.dense[0]
    }

    /// Mutable access to the sentinel record.
    ///
    /// Exists because fallback accessors hand the sentinel out for writes
    /// too; anything written here is visible to every later fallback read.
    #[inline]
    pub fn sentinel_mut(&mut self) -> &mut T {
        &mut self.dense[0]
    }

    /// Unbinds `id`, compacting the dense array.
    ///
    /// The slot's generation advances by one step (invalidating every
    /// outstanding copy of `id`), the dense tail record is swapped into the
    /// vacated position, the removed record is dropped, and the slot joins
    /// the free-list tail. Removing an already-unbound or stale identifier
    /// is a usage violation; it leaves the storage untouched.
    pub fn remove(&mut self, id: Ident) {
        // Slot 0 is the sentinel and is never released.
        if id.is_none() {
            return;
        }
        let slot = id.index();
        let Some(entry) = self.slots.get_mut(slot) else {
            return;
        };
        if entry.id != id {
            return;
        }
        let Some(pos) = entry.dense.take() else {
            return;
        };
        entry.id = entry.id.bumped();

        let pos = pos as usize;
        self.dense.swap_remove(pos);
        if pos < self.dense.len() {
            let moved = self.dense[pos].id();
            self.slots[moved.index()].dense = Some(pos as u32);
        }

        self.enqueue_free(slot as u32);
    }

    /// Appends a freed slot at the free-list tail (FIFO recycling).
    fn enqueue_free(&mut self, slot: u32) {
        self.slots[slot as usize].next = FREE_END;
        if self.free_head == FREE_END {
            self.free_head = slot;
        } else {
            self.slots[self.free_tail as usize].next = slot;
        }
        self.free_tail = slot;
    }

    /// Number of live records, excluding the sentinel.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len() - 1
    }

    /// True when no live records are bound (the sentinel does not count).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot count, sentinel included.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes reserved upfront for the dense record array.
    #[inline]
    #[must_use]
    pub const fn reserved_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// Iterates every live record, skipping the sentinel.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.dense.iter().skip(1)
    }

    /// Mutable iteration over every live record, skipping the sentinel.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.dense.iter_mut().skip(1)
    }
}

impl<T: Record> Default for PackedStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        id: Ident,
        value: u32,
    }

    impl Probe {
        fn new(value: u32) -> Self {
            Self {
                id: Ident::INVALID,
                value,
            }
        }
    }

    impl Record for Probe {
        fn id(&self) -> Ident {
            self.id
        }
        fn bind_id(&mut self, id: Ident) {
            self.id = id;
        }
    }

    #[test]
    fn test_sentinel_installed() {
        let storage: PackedStorage<Probe> = PackedStorage::with_capacity(8);
        assert_eq!(storage.len(), 0);
        assert!(storage.is_empty());
        assert_eq!(storage.sentinel().id, Ident::INVALID);
        assert!(storage.has(Ident::INVALID));
        assert_eq!(storage.iter().count(), 0);
    }

    #[test]
    fn test_add_stamps_identifier() {
        let mut storage = PackedStorage::with_capacity(8);
        let id = storage.add(Probe::new(7));
        assert!(id.is_valid());
        assert!(storage.has(id));
        assert_eq!(storage.lookup(id).value, 7);
        assert_eq!(storage.lookup(id).id, id);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_invalidates_and_compacts() {
        let mut storage = PackedStorage::with_capacity(8);
        let a = storage.add(Probe::new(1));
        let b = storage.add(Probe::new(2));
        let c = storage.add(Probe::new(3));

        storage.remove(b);
        assert!(!storage.has(b));
        assert!(storage.has(a));
        assert!(storage.has(c));
        assert_eq!(storage.len(), 2);

        // Swap compaction relocated the tail record; identifiers still
        // resolve to the right values.
        assert_eq!(storage.lookup(a).value, 1);
        assert_eq!(storage.lookup(c).value, 3);
    }

    #[test]
    fn test_stale_identifier_stays_dead() {
        let mut storage = PackedStorage::with_capacity(4);
        let a = storage.add(Probe::new(1));
        storage.remove(a);
        assert!(!storage.has(a));

        // Refill until the slot is recycled; the stale id must never
        // come back to life.
        let b = storage.add(Probe::new(2));
        let c = storage.add(Probe::new(3));
        let d = storage.add(Probe::new(4));
        assert!(!storage.has(a));
        assert!(storage.has(b));
        assert!(storage.has(c));

        // FIFO recycling hands a's slot back last, at the next generation.
        assert_eq!(d, a.bumped());
        assert_eq!(storage.lookup(d).value, 4);
    }

    #[test]
    fn test_fifo_recycling_order() {
        let mut storage = PackedStorage::with_capacity(16);
        let a = storage.add(Probe::new(1));
        let b = storage.add(Probe::new(2));
        let c = storage.add(Probe::new(3));

        storage.remove(b);
        storage.remove(a);
        storage.remove(c);

        // Oldest-freed first: b's slot, then a's, then c's.
        assert_eq!(storage.add(Probe::new(4)).index(), b.index());
        assert_eq!(storage.add(Probe::new(5)).index(), a.index());
        assert_eq!(storage.add(Probe::new(6)).index(), c.index());
    }

    #[test]
    fn test_free_list_survives_draining() {
        let mut storage = PackedStorage::with_capacity(3);
        let a = storage.add(Probe::new(1));
        let b = storage.add(Probe::new(2));
        // Free list is now fully drained.
        storage.remove(a);
        storage.remove(b);
        let c = storage.add(Probe::new(3));
        let d = storage.add(Probe::new(4));
        assert_eq!(c.index(), a.index());
        assert_eq!(d.index(), b.index());
        assert_eq!(storage.len(), 2);
    }

    #[test]
    #[should_panic(expected = "packed storage exhausted")]
    fn test_capacity_exhaustion_is_fatal() {
        let mut storage = PackedStorage::with_capacity(2);
        let _ = storage.add(Probe::new(1));
        let _ = storage.add(Probe::new(2));
    }

    #[test]
    fn test_density_after_churn() {
        let mut storage = PackedStorage::with_capacity(32);
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(storage.add(Probe::new(i)));
        }
        for id in ids.iter().step_by(2) {
            storage.remove(*id);
        }
        assert_eq!(storage.len(), 5);
        assert_eq!(storage.iter().count(), 5);
        let live: Vec<u32> = storage.iter().map(|p| p.value).collect();
        for odd in [1, 3, 5, 7, 9] {
            assert!(live.contains(&odd));
        }
    }

    #[test]
    fn test_remove_stale_is_noop() {
        let mut storage = PackedStorage::with_capacity(8);
        let a = storage.add(Probe::new(1));
        storage.remove(a);
        storage.remove(a); // stale; must not disturb anything
        let b = storage.add(Probe::new(2));
        assert!(storage.has(b));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_sentinel_is_never_released() {
        let mut storage: PackedStorage<Probe> = PackedStorage::with_capacity(4);
        storage.remove(Ident::INVALID);
        assert!(storage.has(Ident::INVALID));
        assert_eq!(storage.sentinel().id, Ident::INVALID);
    }
}
