//! Node storage with stable indices.
//!
//! Ordered maps in this crate never own their nodes through pointers. Every
//! node lives in a [`Storage`] slot and links to its neighbours by index, so
//! `next`/`down` links are plain integers and ownership stays with the arena.
//!
//! ```text
//! Storage<T>                 - insert / get / remove by index
//!     │
//!     ├── ArenaStorage<T>    - fixed capacity, try_insert may return Full
//!     │
//!     └── slab::Slab<T>      - growable, never full (UnboundedStorage)
//! ```

use std::marker::PhantomData;

use thiserror::Error;

use crate::Index;

/// Slab-like storage with stable indices.
///
/// An index stays valid until the slot is removed. Removed slots may be
/// handed out again by later inserts.
pub trait Storage<T> {
    /// Index type addressing slots of this storage.
    type Index: Index;

    /// Inserts a value, returning its index, or gives the value back if the
    /// storage has no free slot.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Full<T>>;

    /// Removes and returns the value at `index`, if occupied.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if occupied.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if occupied.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker for storage whose [`Storage::try_insert`] never fails.
///
/// Data structures expose infallible `insert` methods only for these.
pub trait UnboundedStorage<T>: Storage<T> {}

/// Error returned when fixed-capacity storage is full.
///
/// Carries the value that could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("storage is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// =============================================================================
// ArenaStorage - fixed capacity, LIFO slot reuse
// =============================================================================

enum Slot<T> {
    Occupied(T),
    Vacant,
}

/// Fixed-capacity arena with LIFO slot reuse.
///
/// All slots are allocated up front; inserting never reallocates. When every
/// slot is occupied, [`Storage::try_insert`] returns [`Full`].
///
/// # Example
///
/// ```
/// use strata_collections::{ArenaStorage, Storage};
///
/// let mut arena: ArenaStorage<&str> = ArenaStorage::with_capacity(2);
/// let a = arena.try_insert("a").unwrap();
/// let _b = arena.try_insert("b").unwrap();
/// assert!(arena.try_insert("c").is_err());
///
/// arena.remove(a);
/// assert_eq!(arena.try_insert("c").unwrap(), a);
/// ```
pub struct ArenaStorage<T, Idx: Index = u32> {
    slots: Vec<Slot<T>>,
    /// Stack of vacant slot positions; the top is reused first.
    free: Vec<Idx>,
    _marker: PhantomData<Idx>,
}

impl<T, Idx: Index> ArenaStorage<T, Idx> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or not addressable by `Idx`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= Idx::max_slots(),
            "capacity exceeds index type maximum"
        );

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Vacant);
        // Lowest positions on top so indices are handed out in order.
        let free = (0..capacity).rev().map(Idx::from_usize).collect();

        Self {
            slots,
            free,
            _marker: PhantomData,
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Drops every stored value and makes all slots available again.
    ///
    /// Any data structure still holding indices into this arena is left
    /// dangling; clear those first.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Vacant;
        }
        self.free.clear();
        self.free
            .extend((0..self.slots.len()).rev().map(Idx::from_usize));
    }
}

impl<T, Idx: Index> Storage<T> for ArenaStorage<T, Idx> {
    type Index = Idx;

    fn try_insert(&mut self, value: T) -> Result<Idx, Full<T>> {
        let Some(idx) = self.free.pop() else {
            return Err(Full(value));
        };
        self.slots[idx.as_usize()] = Slot::Occupied(value);
        Ok(idx)
    }

    fn remove(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.as_usize())?;
        match core::mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(value) => {
                self.free.push(index);
                Some(value)
            }
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn get(&self, index: Idx) -> Option<&T> {
        match self.slots.get(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        match self.slots.get_mut(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

// =============================================================================
// slab::Slab - growable
// =============================================================================

impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}

impl<T> UnboundedStorage<T> for slab::Slab<T> {}
