//! Convenience wrappers that own their storage.
//!
//! [`OwnedSkipList`] bundles a [`SkipList`](crate::SkipList) with a growable
//! slab so callers stop threading `&mut storage` through every call.
//!
//! Use the raw [`SkipList`](crate::SkipList) instead when several maps should
//! share one node pool, or when the pool must be fixed-capacity
//! ([`ArenaStorage`](crate::ArenaStorage)).
//!
//! # Example
//!
//! ```
//! use strata_collections::OwnedSkipList;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut map = OwnedSkipList::new(SmallRng::seed_from_u64(1));
//! map.insert(3, "c");
//! map.insert(1, "a");
//! assert_eq!(map.first(), Some((&1, &"a")));
//! ```

mod skiplist;

pub use skiplist::OwnedSkipList;
