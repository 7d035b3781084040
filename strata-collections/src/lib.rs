//! Ordered maps over index-addressed storage.
//!
//! The centrepiece is a probabilistic [`SkipList`]: a stack of sorted linked
//! levels where each key builds a tower whose height is decided by coin
//! flips. Search, insert and removal take expected O(log n) steps and never
//! rebalance.
//!
//! # Design Philosophy
//!
//! Nodes are not owned through pointers. They live in a [`Storage`] and
//! link to each other by integer index:
//!
//! ```text
//! Storage (Slab / ArenaStorage) - owns nodes, hands out stable indices
//! SkipList                      - coordinates indices, owns nothing
//! ```
//!
//! Benefits:
//! - **No unsafe, no Rc cycles**: links are plain integers
//! - **Bounded memory on demand**: back the list with a fixed [`ArenaStorage`]
//! - **Shared storage**: several lists can draw nodes from one pool
//! - **Replayable**: tower heights come from an injected [`Coin`]
//!
//! # Quick Start
//!
//! ```
//! use strata_collections::{SkipList, SlabSkipStorage};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut storage: SlabSkipStorage<u32, &str> = SlabSkipStorage::new();
//! let mut map: SkipList<u32, &str, _, _, usize> = SkipList::new(SmallRng::seed_from_u64(42));
//!
//! map.insert(&mut storage, 2, "two");
//! map.insert(&mut storage, 1, "one");
//!
//! assert_eq!(map.get(&storage, &2), Some(&"two"));
//! assert_eq!(map.keys(&storage).copied().collect::<Vec<_>>(), vec![1, 2]);
//! ```
//!
//! For a single map that owns its pool, [`OwnedSkipList`] drops the storage
//! argument:
//!
//! ```
//! use strata_collections::OwnedSkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut map = OwnedSkipList::new(SmallRng::seed_from_u64(42));
//! map.insert(1, "one");
//! print!("{}", map); // x->1 on every level the tower reached
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a list must use the same storage instance. This is the
//! caller's responsibility, same discipline as the `slab` crate. Passing a
//! different storage panics on a missing slot or silently reads foreign
//! nodes.
//!
//! # Storage Options
//!
//! | Storage | Capacity | Insert |
//! |---------|----------|--------|
//! | [`ArenaStorage`] | Fixed | `try_insert`, may return [`Full`] |
//! | `slab::Slab` | Growable | `insert`, infallible |
//!
//! # Data Structures
//!
//! | Structure | Balancing | Notes |
//! |-----------|-----------|-------|
//! | [`SkipList`] | Randomized | External storage, level rendering |
//! | [`OwnedSkipList`] | Randomized | Owns a slab |
//! | [`RedBlackTree`] | Left-leaning red-black | Deterministic baseline |
//!
//! Both owned maps implement [`OrderedMap`].
//!
//! # Logging
//!
//! Structural events go through `tracing`: `debug` when the level stack
//! grows, `trace` per inserted or removed tower, `warn` when bounded storage
//! fills while a tower is being promoted.

#![warn(missing_docs)]

pub mod coin;
pub mod error;
pub mod index;
pub mod ordered;
pub mod owned;
pub mod rbtree;
pub mod skiplist;
pub mod storage;

pub use coin::{Coin, FlipSequence};
pub use error::InvariantViolation;
pub use index::Index;
pub use ordered::OrderedMap;
pub use owned::OwnedSkipList;
pub use rbtree::RedBlackTree;
pub use skiplist::{ArenaSkipStorage, SkipList, SkipNode, Slot, SlabSkipStorage};
pub use storage::{ArenaStorage, Full, Storage, UnboundedStorage};
