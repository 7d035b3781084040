//! Structural validation errors.
//!
//! These never come out of normal map operations. A map that returns one from
//! `check_invariants` has a bug in its link surgery.

use thiserror::Error;

/// A broken structural invariant found by `check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A link points at a slot the storage does not hold.
    #[error("dangling link to slot {slot} at level {level}")]
    DanglingLink {
        /// Level the link was followed on (0 is the bottom).
        level: usize,
        /// Slot position the link referenced.
        slot: usize,
    },

    /// A head sentinel sits where a data node was expected, or the reverse.
    #[error("sentinel out of place at level {level}")]
    MisplacedSentinel {
        /// Level the sentinel was found on.
        level: usize,
    },

    /// Two neighbouring keys on one level are not strictly increasing.
    #[error("keys out of order at level {level}, position {position}")]
    OutOfOrder {
        /// Level where the ordering broke.
        level: usize,
        /// Position within the level (0 is the first data node).
        position: usize,
    },

    /// A tower node's `down` link is missing or lands on a different key.
    #[error("tower gap below level {level}, position {position}")]
    TowerGap {
        /// Level of the node whose `down` link is broken.
        level: usize,
        /// Position within the level.
        position: usize,
    },

    /// The number of nodes on the bottom level disagrees with the map length.
    #[error("bottom level holds {found} keys, map reports {expected}")]
    LengthMismatch {
        /// Length recorded by the map.
        expected: usize,
        /// Keys actually linked on level 0.
        found: usize,
    },

    /// The head chain disagrees with the recorded height.
    #[error("head chain has {found} levels, map reports {expected}")]
    HeightMismatch {
        /// Height recorded by the map.
        expected: usize,
        /// Head sentinels actually linked.
        found: usize,
    },

    /// A red-black tree has a red right link.
    #[error("red right link")]
    RedRightLink,

    /// A red-black tree has two red links in a row.
    #[error("two consecutive red links")]
    DoubleRed,

    /// Paths from the root to empty links cross different numbers of black links.
    #[error("unbalanced black height")]
    BlackImbalance,

    /// A subtree's cached size disagrees with its node count.
    #[error("stale subtree size")]
    SizeMismatch,

    /// A red-black tree root is red.
    #[error("red root")]
    RedRoot,
}
