//! Skip list - a probabilistic sorted map over index-addressed storage.
//!
//! Search, insert and removal run in expected O(log n) time with no
//! rebalancing. Towers grow by coin flips at insertion time and the level
//! stack grows lazily whenever a tower outgrows it.
//!
//! # Layout
//!
//! Every level is its own singly linked chain starting at a head sentinel
//! (`x` below). A key owns one node per level its tower spans; each node
//! links `next` along its level and `down` to the same key one level lower.
//! Head sentinels are stacked the same way, and the topmost head is the
//! only entry point.
//!
//! ```text
//! level 2:  x ───────────► 20 ─────────────────────► NIL
//!           │              │
//! level 1:  x ───────────► 20 ────────► 40 ────────► NIL
//!           │              │            │
//! level 0:  x ──► 10 ────► 20 ──► 30 ──► 40 ──► 50 ─► NIL
//! ```
//!
//! Nodes live in a [`Storage`] and refer to each other by index. The list
//! itself only holds the index of the top head, so the same storage can back
//! several lists.
//!
//! Levels are never removed. Deleting the only tall tower leaves empty levels
//! at the top; they cost one sentinel each and are walked like any other.
//!
//! # Example
//!
//! ```
//! use strata_collections::{SkipList, SlabSkipStorage};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut storage: SlabSkipStorage<u64, String> = SlabSkipStorage::new();
//! let mut map: SkipList<u64, String, _, _, usize> = SkipList::new(SmallRng::seed_from_u64(7));
//!
//! map.insert(&mut storage, 100, "first".into());
//! map.insert(&mut storage, 50, "second".into());
//!
//! assert_eq!(map.get(&storage, &50), Some(&"second".into()));
//! assert_eq!(map.first(&storage), Some((&50, &"second".into())));
//! assert_eq!(map.remove(&mut storage, &100), Some("first".into()));
//! ```

use core::cmp::Ordering;
use core::fmt::{self, Write};
use core::marker::PhantomData;
use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::coin::Coin;
use crate::error::InvariantViolation;
use crate::index::Index;
use crate::storage::{ArenaStorage, Full, Storage, UnboundedStorage};

// ============================================================================
// SkipNode
// ============================================================================

/// What a skip list node carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// A level's head, ordered before every key.
    Sentinel,
    /// One level of a key's tower.
    Data {
        /// Ordering key.
        key: K,
        /// Value, replicated on every level of the tower.
        value: V,
    },
}

/// One node of one level.
#[derive(Debug, Clone)]
pub struct SkipNode<K, V, Idx: Index> {
    slot: Slot<K, V>,
    /// Successor on the same level.
    next: Idx,
    /// Same key (or the next head) one level lower.
    down: Idx,
}

impl<K, V, Idx: Index> SkipNode<K, V, Idx> {
    #[inline]
    fn sentinel(down: Idx) -> Self {
        Self {
            slot: Slot::Sentinel,
            next: Idx::NONE,
            down,
        }
    }

    #[inline]
    fn data(key: K, value: V, down: Idx) -> Self {
        Self {
            slot: Slot::Data { key, value },
            next: Idx::NONE,
            down,
        }
    }

    /// Returns the node's contents.
    #[inline]
    pub fn slot(&self) -> &Slot<K, V> {
        &self.slot
    }

    /// Returns the key, or `None` for a head sentinel.
    #[inline]
    pub fn key(&self) -> Option<&K> {
        match &self.slot {
            Slot::Data { key, .. } => Some(key),
            Slot::Sentinel => None,
        }
    }

    /// Returns the value, or `None` for a head sentinel.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match &self.slot {
            Slot::Data { value, .. } => Some(value),
            Slot::Sentinel => None,
        }
    }

    /// Returns `true` for a level head.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self.slot, Slot::Sentinel)
    }

    #[inline]
    fn entry(&self) -> Option<(&K, &V)> {
        match &self.slot {
            Slot::Data { key, value } => Some((key, value)),
            Slot::Sentinel => None,
        }
    }

    #[inline]
    fn value_mut(&mut self) -> &mut V {
        match &mut self.slot {
            Slot::Data { value, .. } => value,
            Slot::Sentinel => panic!("tower descends into a head sentinel"),
        }
    }

    #[inline]
    fn into_value(self) -> Option<V> {
        match self.slot {
            Slot::Data { value, .. } => Some(value),
            Slot::Sentinel => None,
        }
    }
}

/// Position of a present key: the top of its tower and the node preceding
/// its base on level 0.
#[derive(Debug, Clone, Copy)]
struct Located<Idx> {
    top: Idx,
    base_pred: Idx,
}

// ============================================================================
// SkipList
// ============================================================================

/// A probabilistic sorted map backed by external storage.
///
/// # Type Parameters
///
/// - `K`: key type, must implement `Ord`
/// - `V`: value type; cloned once per level of a key's tower
/// - `S`: node storage implementing [`Storage`]
/// - `C`: promotion coin implementing [`Coin`]
/// - `Idx`: storage index type, defaults to `u32`
#[derive(Debug)]
pub struct SkipList<K, V, S, C, Idx = u32>
where
    Idx: Index,
{
    /// Head sentinel of the topmost level. `NONE` until the first insert.
    head: Idx,
    /// Head sentinel of level 0, kept for in-order iteration.
    base: Idx,
    /// Number of levels (head sentinels) in the stack.
    height: usize,
    /// Upper bound on `height`.
    max_height: usize,
    /// Number of keys.
    len: usize,
    coin: C,
    _marker: PhantomData<(K, V, S)>,
}

impl<K, V, S, C, Idx> SkipList<K, V, S, C, Idx>
where
    K: Ord,
    Idx: Index,
    S: Storage<SkipNode<K, V, Idx>, Index = Idx>,
{
    /// Creates an empty skip list whose towers grow until the coin says stop.
    pub fn new(coin: C) -> Self {
        Self::with_max_height(coin, usize::MAX)
    }

    /// Creates an empty skip list that never grows past `max_height` levels.
    ///
    /// Towers that would grow taller are cut at the cap. A cap of 1 degrades
    /// the list to a sorted linked list.
    ///
    /// # Panics
    ///
    /// Panics if `max_height` is 0.
    pub fn with_max_height(coin: C, max_height: usize) -> Self {
        assert!(max_height > 0, "max_height must be > 0");
        Self {
            head: Idx::NONE,
            base: Idx::NONE,
            height: 0,
            max_height,
            len: 0,
            coin,
            _marker: PhantomData,
        }
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels, including empty ones left by removals.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the configured level cap.
    #[inline]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Returns the promotion coin.
    #[inline]
    pub fn coin(&self) -> &C {
        &self.coin
    }

    /// Returns `true` if the list contains `key`.
    #[inline]
    pub fn contains_key(&self, storage: &S, key: &K) -> bool {
        self.locate(storage, key).is_some()
    }

    /// Returns the value stored for `key`, or `None` if absent.
    pub fn get<'a>(&self, storage: &'a S, key: &K) -> Option<&'a V>
    where
        K: 'a,
        V: 'a,
        Idx: 'a,
    {
        let found = self.locate(storage, key)?;
        let base = Self::node(storage, found.base_pred).next;
        Self::node(storage, base).value()
    }

    /// Returns the number of levels `key`'s tower spans, or `None` if absent.
    pub fn tower_height(&self, storage: &S, key: &K) -> Option<usize> {
        let found = self.locate(storage, key)?;
        let mut levels = 0;
        let mut current = found.top;
        while current.is_some() {
            levels += 1;
            current = Self::node(storage, current).down;
        }
        Some(levels)
    }

    /// Returns the smallest key and its value.
    pub fn first<'a>(&self, storage: &'a S) -> Option<(&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
        Idx: 'a,
    {
        if self.base.is_none() {
            return None;
        }
        let first = Self::node(storage, self.base).next;
        if first.is_none() {
            return None;
        }
        Self::node(storage, first).entry()
    }

    /// Returns the largest key and its value.
    ///
    /// Runs right-then-down from the top head, O(log n) expected.
    pub fn last<'a>(&self, storage: &'a S) -> Option<(&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
        Idx: 'a,
    {
        let mut current = self.head;
        while current.is_some() {
            let mut here = Self::node(storage, current);
            while here.next.is_some() {
                current = here.next;
                here = Self::node(storage, current);
            }
            if here.down.is_none() {
                return here.entry();
            }
            current = here.down;
        }
        None
    }

    /// Removes `key` and returns its value, or `None` if absent.
    ///
    /// The predecessor path is captured once and the tower is unlinked
    /// bottom-up in a single pass, releasing every node to the storage.
    pub fn remove(&mut self, storage: &mut S, key: &K) -> Option<V> {
        let path = self.predecessors(storage, key);
        let mut removed = None;
        let mut levels = 0usize;

        for &pred in path.iter().rev() {
            let target = Self::node(storage, pred).next;
            if target.is_none() || Self::node(storage, target).key() != Some(key) {
                // Towers are contiguous from level 0, so the first miss ends it.
                break;
            }
            let unlinked = storage
                .remove(target)
                .expect("skip list link points at an empty slot");
            Self::node_mut(storage, pred).next = unlinked.next;
            if removed.is_none() {
                removed = unlinked.into_value();
            }
            levels += 1;
        }

        if removed.is_some() {
            self.len -= 1;
            trace!(levels, len = self.len, "removed tower");
        }
        removed
    }

    /// Removes and returns the smallest entry.
    pub fn pop_first(&mut self, storage: &mut S) -> Option<(K, V)>
    where
        K: Clone,
    {
        let key = self.first(storage)?.0.clone();
        let value = self.remove(storage, &key)?;
        Some((key, value))
    }

    /// Removes and returns the largest entry.
    pub fn pop_last(&mut self, storage: &mut S) -> Option<(K, V)>
    where
        K: Clone,
    {
        let key = self.last(storage)?.0.clone();
        let value = self.remove(storage, &key)?;
        Some((key, value))
    }

    /// Removes every node, head sentinels included, and resets the height.
    pub fn clear(&mut self, storage: &mut S) {
        let mut head = self.head;
        while head.is_some() {
            let sentinel = storage
                .remove(head)
                .expect("skip list link points at an empty slot");
            let mut current = sentinel.next;
            while current.is_some() {
                current = storage
                    .remove(current)
                    .expect("skip list link points at an empty slot")
                    .next;
            }
            head = sentinel.down;
        }

        self.head = Idx::NONE;
        self.base = Idx::NONE;
        self.height = 0;
        self.len = 0;
    }

    /// Returns an iterator over key-value pairs in key order.
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, K, V, S, Idx> {
        let current = if self.base.is_none() {
            Idx::NONE
        } else {
            Self::node(storage, self.base).next
        };
        Iter {
            storage,
            current,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over keys in order.
    pub fn keys<'a>(&self, storage: &'a S) -> Keys<'a, K, V, S, Idx> {
        Keys {
            inner: self.iter(storage),
        }
    }

    /// Returns an iterator over values in key order.
    pub fn values<'a>(&self, storage: &'a S) -> Values<'a, K, V, S, Idx> {
        Values {
            inner: self.iter(storage),
        }
    }

    /// Renders one line per level, top level first, e.g. `x->1->3->7`.
    ///
    /// `x` stands for the head sentinel. Meant for debugging, not as a
    /// stable format.
    pub fn render(&self, storage: &S) -> String
    where
        K: fmt::Debug,
    {
        let mut out = String::new();
        for head in self.heads(storage) {
            out.push('x');
            let mut current = Self::node(storage, head).next;
            while current.is_some() {
                let here = Self::node(storage, current);
                match here.key() {
                    Some(key) => {
                        write!(out, "->{:?}", key).expect("writing to a String cannot fail");
                    }
                    None => out.push_str("->x"),
                }
                current = here.next;
            }
            out.push('\n');
        }
        out
    }

    /// Walks every level and checks ordering, tower contiguity, the head
    /// chain and the recorded length.
    pub fn check_invariants(&self, storage: &S) -> Result<(), InvariantViolation> {
        let mut heads = Vec::new();
        let mut head = self.head;
        while head.is_some() {
            let level = self.height.saturating_sub(heads.len() + 1);
            let sentinel = storage.get(head).ok_or(InvariantViolation::DanglingLink {
                level,
                slot: head.as_usize(),
            })?;
            if !sentinel.is_sentinel() {
                return Err(InvariantViolation::MisplacedSentinel { level });
            }
            heads.push(head);
            head = sentinel.down;
        }
        if heads.len() != self.height {
            return Err(InvariantViolation::HeightMismatch {
                expected: self.height,
                found: heads.len(),
            });
        }
        if heads.last().copied().unwrap_or(Idx::NONE) != self.base {
            return Err(InvariantViolation::MisplacedSentinel { level: 0 });
        }

        // Bottom-up, so each level can check its `down` links against the
        // set of nodes on the level below.
        let mut below: HashSet<usize> = HashSet::new();
        for (level, &head) in heads.iter().rev().enumerate() {
            let mut here: HashSet<usize> = HashSet::new();
            let mut prev_key: Option<&K> = None;
            let mut current = Self::node(storage, head).next;
            let mut position = 0;

            while current.is_some() {
                let data = storage.get(current).ok_or(InvariantViolation::DanglingLink {
                    level,
                    slot: current.as_usize(),
                })?;
                let key = data
                    .key()
                    .ok_or(InvariantViolation::MisplacedSentinel { level })?;
                if prev_key.is_some_and(|prev| prev >= key) {
                    return Err(InvariantViolation::OutOfOrder { level, position });
                }

                let gap = InvariantViolation::TowerGap { level, position };
                if level == 0 {
                    if data.down.is_some() {
                        return Err(gap);
                    }
                } else {
                    if !below.contains(&data.down.as_usize()) {
                        return Err(gap);
                    }
                    let lower = storage.get(data.down).ok_or(gap.clone())?;
                    if lower.key() != Some(key) {
                        return Err(gap);
                    }
                }

                here.insert(current.as_usize());
                prev_key = Some(key);
                current = data.next;
                position += 1;
            }

            if level == 0 && position != self.len {
                return Err(InvariantViolation::LengthMismatch {
                    expected: self.len,
                    found: position,
                });
            }
            below = here;
        }

        if heads.is_empty() && self.len != 0 {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: 0,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[inline]
    fn node(storage: &S, idx: Idx) -> &SkipNode<K, V, Idx> {
        storage
            .get(idx)
            .expect("skip list link points at an empty slot")
    }

    #[inline]
    fn node_mut(storage: &mut S, idx: Idx) -> &mut SkipNode<K, V, Idx> {
        storage
            .get_mut(idx)
            .expect("skip list link points at an empty slot")
    }

    /// The same-level successor of `idx` and its key, if any.
    #[inline]
    fn successor<'s>(storage: &'s S, idx: Idx) -> Option<(Idx, &'s K)>
    where
        K: 's,
        V: 's,
        Idx: 's,
    {
        let next = Self::node(storage, idx).next;
        if next.is_none() {
            return None;
        }
        let key = Self::node(storage, next)
            .key()
            .expect("head sentinel linked as a successor");
        Some((next, key))
    }

    // ========================================================================
    // Locators
    // ========================================================================

    /// Finds `key` walking down from the top head.
    ///
    /// On each level, advance while the successor's key is smaller. A
    /// successor equal to `key` marks the tower (the first such hit is its
    /// top) but the walk still drops down from the current node, so only a
    /// hit on level 0 reports the key as present.
    fn locate(&self, storage: &S, key: &K) -> Option<Located<Idx>> {
        let mut current = self.head;
        let mut top = Idx::NONE;
        let mut level = self.height;

        while current.is_some() {
            level -= 1;
            let hit = loop {
                match Self::successor(storage, current) {
                    Some((next, next_key)) => match next_key.cmp(key) {
                        Ordering::Less => current = next,
                        Ordering::Equal => {
                            if top.is_none() {
                                top = next;
                            }
                            break true;
                        }
                        Ordering::Greater => break false,
                    },
                    None => break false,
                }
            };
            trace!(level, at = current.as_usize(), hit, "lookup step");

            let down = Self::node(storage, current).down;
            if down.is_none() {
                return hit.then_some(Located {
                    top,
                    base_pred: current,
                });
            }
            current = down;
        }
        None
    }

    /// Returns the node after which `key` belongs on every level, top level
    /// first. Empty if the list has never held a key.
    fn predecessors(&self, storage: &S, key: &K) -> Vec<Idx> {
        let mut path = Vec::with_capacity(self.height);
        let mut current = self.head;

        while current.is_some() {
            while let Some((next, next_key)) = Self::successor(storage, current) {
                if next_key >= key {
                    break;
                }
                current = next;
            }
            path.push(current);
            current = Self::node(storage, current).down;
        }

        debug_assert_eq!(path.len(), self.height);
        path
    }

    /// Head sentinels, top level first.
    fn heads(&self, storage: &S) -> Vec<Idx> {
        let mut heads = Vec::with_capacity(self.height);
        let mut head = self.head;
        while head.is_some() {
            heads.push(head);
            head = Self::node(storage, head).down;
        }
        heads
    }

    // ========================================================================
    // Link surgery
    // ========================================================================

    /// Writes `value` into every node of the tower starting at `top` and
    /// returns the value the base node held.
    fn overwrite_tower(storage: &mut S, top: Idx, value: V) -> V
    where
        V: Clone,
    {
        let mut current = top;
        loop {
            let here = Self::node_mut(storage, current);
            if here.down.is_none() {
                break;
            }
            *here.value_mut() = value.clone();
            current = here.down;
        }
        core::mem::replace(Self::node_mut(storage, current).value_mut(), value)
    }

    /// Links `new` into a level right after `pred`.
    fn splice(
        storage: &mut S,
        pred: Idx,
        mut new: SkipNode<K, V, Idx>,
    ) -> Result<Idx, Full<SkipNode<K, V, Idx>>> {
        new.next = Self::node(storage, pred).next;
        let idx = storage.try_insert(new)?;
        Self::node_mut(storage, pred).next = idx;
        Ok(idx)
    }

    /// Pushes a new level holding only `new` on top of the stack.
    fn grow(
        &mut self,
        storage: &mut S,
        new: SkipNode<K, V, Idx>,
    ) -> Result<Idx, Full<SkipNode<K, V, Idx>>> {
        let head = storage.try_insert(SkipNode::sentinel(self.head))?;
        let idx = match storage.try_insert(new) {
            Ok(idx) => idx,
            Err(full) => {
                storage.remove(head);
                return Err(full);
            }
        };
        Self::node_mut(storage, head).next = idx;

        self.head = head;
        self.height += 1;
        debug!(height = self.height, "level stack grew");
        Ok(idx)
    }
}

// ============================================================================
// Insert
// ============================================================================

impl<K, V, S, C, Idx> SkipList<K, V, S, C, Idx>
where
    K: Ord + Clone,
    V: Clone,
    Idx: Index,
    C: Coin,
    S: Storage<SkipNode<K, V, Idx>, Index = Idx>,
{
    /// Inserts a key-value pair, returning the previous value if the key was
    /// present.
    ///
    /// A present key has its value replaced on every level of its tower; the
    /// tower keeps its height. A new key gets a base node on level 0 and
    /// then grows one level per successful coin flip, pushing new levels on
    /// top of the stack when it outgrows it.
    ///
    /// Returns the pair back if the storage cannot hold the base node. If the
    /// storage fills while the tower is growing, the tower simply stops at
    /// the height it reached.
    pub fn try_insert(
        &mut self,
        storage: &mut S,
        key: K,
        value: V,
    ) -> Result<Option<V>, Full<(K, V)>> {
        if let Some(found) = self.locate(storage, &key) {
            return Ok(Some(Self::overwrite_tower(storage, found.top, value)));
        }

        if self.head.is_none() {
            let Ok(head) = storage.try_insert(SkipNode::sentinel(Idx::NONE)) else {
                return Err(Full((key, value)));
            };
            self.head = head;
            self.base = head;
            self.height = 1;
            debug!(height = 1, "bootstrapped level stack");
        }

        let mut path = self.predecessors(storage, &key);
        let base_pred = path
            .pop()
            .expect("predecessor path always reaches level 0");
        let base = SkipNode::data(key.clone(), value.clone(), Idx::NONE);
        let Ok(mut top) = Self::splice(storage, base_pred, base) else {
            return Err(Full((key, value)));
        };
        self.len += 1;

        let mut tower = 1;
        while tower < self.max_height && self.coin.flip() {
            let promoted = SkipNode::data(key.clone(), value.clone(), top);
            let placed = match path.pop() {
                Some(pred) => Self::splice(storage, pred, promoted),
                None => self.grow(storage, promoted),
            };
            match placed {
                Ok(idx) => {
                    top = idx;
                    tower += 1;
                }
                Err(_) => {
                    warn!(tower, "storage full while promoting, tower capped");
                    break;
                }
            }
        }

        trace!(tower, len = self.len, "inserted tower");
        Ok(None)
    }
}

impl<K, V, S, C, Idx> SkipList<K, V, S, C, Idx>
where
    K: Ord + Clone,
    V: Clone,
    Idx: Index,
    C: Coin,
    S: UnboundedStorage<SkipNode<K, V, Idx>, Index = Idx>,
{
    /// Inserts a key-value pair, returning the previous value if the key was
    /// present.
    ///
    /// Same as [`try_insert`](Self::try_insert) for storage that never fills.
    pub fn insert(&mut self, storage: &mut S, key: K, value: V) -> Option<V> {
        match self.try_insert(storage, key, value) {
            Ok(previous) => previous,
            Err(_) => unreachable!("unbounded storage reported full"),
        }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// An iterator over key-value pairs in key order.
pub struct Iter<'a, K, V, S, Idx: Index> {
    storage: &'a S,
    current: Idx,
    _marker: PhantomData<(K, V)>,
}

impl<'a, K: 'a, V: 'a, S, Idx> Iterator for Iter<'a, K, V, S, Idx>
where
    Idx: Index + 'a,
    S: Storage<SkipNode<K, V, Idx>, Index = Idx>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let here = self
            .storage
            .get(self.current)
            .expect("skip list link points at an empty slot");
        self.current = here.next;
        here.entry()
    }
}

/// An iterator over keys in order.
pub struct Keys<'a, K, V, S, Idx: Index> {
    inner: Iter<'a, K, V, S, Idx>,
}

impl<'a, K: 'a, V: 'a, S, Idx> Iterator for Keys<'a, K, V, S, Idx>
where
    Idx: Index + 'a,
    S: Storage<SkipNode<K, V, Idx>, Index = Idx>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over values in key order.
pub struct Values<'a, K, V, S, Idx: Index> {
    inner: Iter<'a, K, V, S, Idx>,
}

impl<'a, K: 'a, V: 'a, S, Idx> Iterator for Values<'a, K, V, S, Idx>
where
    Idx: Index + 'a,
    S: Storage<SkipNode<K, V, Idx>, Index = Idx>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

// ============================================================================
// Type aliases
// ============================================================================

/// Fixed-capacity storage for skip list nodes.
pub type ArenaSkipStorage<K, V, Idx = u32> = ArenaStorage<SkipNode<K, V, Idx>, Idx>;

/// Growable storage for skip list nodes.
pub type SlabSkipStorage<K, V> = slab::Slab<SkipNode<K, V, usize>>;


#[cfg(test)]
mod bench_skiplist {
    use super::*;
    use hdrhistogram::Histogram;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::time::Instant;

    type Nodes = SlabSkipStorage<u64, u64>;
    type List = SkipList<u64, u64, Nodes, SmallRng, usize>;

    const KEYS: u64 = 100_000;

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:16} p50: {:5} ns | p99: {:5} ns | p999: {:6} ns | max: {:7} ns",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.max(),
        );
    }

    #[test]
    #[ignore]
    fn bench_insert_get_remove() {
        let mut storage = Nodes::with_capacity(4 * KEYS as usize);
        let mut list: List = SkipList::new(SmallRng::seed_from_u64(12345));
        let mut rng = SmallRng::seed_from_u64(99999);
        let keys: Vec<u64> = (0..KEYS).map(|_| rng.random_range(0..1_000_000)).collect();

        let mut insert = Histogram::<u64>::new(3).unwrap();
        for &key in &keys {
            let start = Instant::now();
            list.insert(&mut storage, key, key);
            insert.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        let mut get = Histogram::<u64>::new(3).unwrap();
        for key in &keys {
            let start = Instant::now();
            std::hint::black_box(list.get(&storage, key));
            get.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        let mut remove = Histogram::<u64>::new(3).unwrap();
        for key in &keys {
            let start = Instant::now();
            std::hint::black_box(list.remove(&mut storage, key));
            remove.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        println!("\nSkipList<u64, u64> ({} keys, height {})", KEYS, list.height());
        print_histogram("insert", &insert);
        print_histogram("get", &get);
        print_histogram("remove", &remove);
    }
}
