//! OwnedSkipList - a skip list that owns its storage.

use core::fmt;

use crate::InvariantViolation;
use crate::coin::Coin;
use crate::skiplist::{Iter, Keys, SkipList, SlabSkipStorage, Values};

type Nodes<K, V> = SlabSkipStorage<K, V>;

/// A skip list that owns growable storage.
///
/// Convenience wrapper around [`SkipList`] + [`SlabSkipStorage`] for a
/// single map that never needs to share its node pool.
///
/// # Example
///
/// ```
/// use strata_collections::OwnedSkipList;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let mut map = OwnedSkipList::new(SmallRng::seed_from_u64(12345));
///
/// map.insert(100, "first".to_string());
/// map.insert(50, "second".to_string());
///
/// assert_eq!(map.get(&50), Some(&"second".into()));
/// assert_eq!(map.first(), Some((&50, &"second".into())));
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, vec![50, 100]);
/// ```
pub struct OwnedSkipList<K, V, C> {
    storage: Nodes<K, V>,
    list: SkipList<K, V, Nodes<K, V>, C, usize>,
}

impl<K: Ord, V, C> OwnedSkipList<K, V, C> {
    /// Creates an empty skip list flipping `coin` to size towers.
    pub fn new(coin: C) -> Self {
        Self {
            storage: Nodes::new(),
            list: SkipList::new(coin),
        }
    }

    /// Creates an empty skip list with room for `capacity` nodes before
    /// the storage reallocates.
    ///
    /// A key takes two nodes on average, plus one per level for heads.
    pub fn with_capacity(coin: C, capacity: usize) -> Self {
        Self {
            storage: Nodes::with_capacity(capacity),
            list: SkipList::new(coin),
        }
    }

    /// Creates an empty skip list that never grows past `max_height` levels.
    ///
    /// # Panics
    ///
    /// Panics if `max_height` is 0.
    pub fn with_max_height(coin: C, max_height: usize) -> Self {
        Self {
            storage: Nodes::new(),
            list: SkipList::with_max_height(coin, max_height),
        }
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no key is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the number of levels.
    #[inline]
    pub fn height(&self) -> usize {
        self.list.height()
    }

    /// Returns the number of nodes held, head sentinels included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the list contains `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.list.contains_key(&self.storage, key)
    }

    /// Returns the value for `key`, or `None` if absent.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.list.get(&self.storage, key)
    }

    /// Returns how many levels `key`'s tower spans.
    #[inline]
    pub fn tower_height(&self, key: &K) -> Option<usize> {
        self.list.tower_height(&self.storage, key)
    }

    /// Returns the smallest key and its value.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.list.first(&self.storage)
    }

    /// Returns the largest key and its value.
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.list.last(&self.storage)
    }

    /// Removes `key` and returns its value, or `None` if absent.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.list.remove(&mut self.storage, key)
    }

    /// Removes and returns the smallest entry.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.list.pop_first(&mut self.storage)
    }

    /// Removes and returns the largest entry.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.list.pop_last(&mut self.storage)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.list.clear(&mut self.storage);
    }

    /// Returns an iterator over key-value pairs in key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, Nodes<K, V>, usize> {
        self.list.iter(&self.storage)
    }

    /// Returns an iterator over keys in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V, Nodes<K, V>, usize> {
        self.list.keys(&self.storage)
    }

    /// Returns an iterator over values in key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V, Nodes<K, V>, usize> {
        self.list.values(&self.storage)
    }

    /// Renders one line per level, top level first.
    pub fn render(&self) -> String
    where
        K: fmt::Debug,
    {
        self.list.render(&self.storage)
    }

    /// Validates the level structure. See [`SkipList::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.list.check_invariants(&self.storage)
    }
}

impl<K, V, C> OwnedSkipList<K, V, C>
where
    K: Ord + Clone,
    V: Clone,
    C: Coin,
{
    /// Inserts a key-value pair, returning the previous value if present.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.list.insert(&mut self.storage, key, value)
    }
}

impl<K: Ord + fmt::Debug, V, C> fmt::Display for OwnedSkipList<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug, C> fmt::Debug for OwnedSkipList<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord, V, C> IntoIterator for &'a OwnedSkipList<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Nodes<K, V>, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for OwnedSkipList<K, V, C>
where
    K: Ord + Clone,
    V: Clone,
    C: Coin,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::FlipSequence;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_map() -> OwnedSkipList<u64, String, SmallRng> {
        OwnedSkipList::with_capacity(SmallRng::seed_from_u64(12345), 64)
    }

    #[test]
    fn basic_insert_get_remove() {
        let mut map = make_map();

        assert_eq!(map.insert(2, "two".into()), None);
        assert_eq!(map.insert(1, "one".into()), None);
        assert_eq!(map.insert(2, "TWO".into()), Some("two".into()));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), Some(&"TWO".into()));
        assert_eq!(map.remove(&1), Some("one".into()));
        assert!(!map.contains_key(&1));
        map.check_invariants().unwrap();
    }

    #[test]
    fn display_renders_levels() {
        let mut map = OwnedSkipList::new(FlipSequence::from_heights([2, 1, 3]));
        map.insert(3, ());
        map.insert(7, ());
        map.insert(1, ());

        assert_eq!(map.to_string(), "x->1\nx->1->3\nx->1->3->7\n");
    }

    #[test]
    fn debug_lists_pairs() {
        let mut map = make_map();
        map.insert(2, "b".into());
        map.insert(1, "a".into());

        assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn extend_and_iterate() {
        let mut map = make_map();
        map.extend((0..20).rev().map(|i| (i, i.to_string())));

        let keys: Vec<u64> = (&map).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..20).collect::<Vec<_>>());
        assert_eq!(map.values().next(), Some(&"0".into()));
        assert_eq!(map.last(), Some((&19, &"19".into())));
    }

    #[test]
    fn pops_mirror_red_black_tree() {
        let mut map = make_map();
        let mut tree = crate::RedBlackTree::new();
        for i in [7u64, 3, 9, 1, 5] {
            map.insert(i, i.to_string());
            tree.insert(i, i.to_string());
        }

        assert_eq!(map.pop_first(), tree.remove_min());
        assert_eq!(map.pop_last(), tree.remove_max());
        assert_eq!(map.pop_first(), Some((3, "3".into())));
        assert_eq!(map.len(), 2);
        map.check_invariants().unwrap();
    }

    #[test]
    fn clear_releases_nodes() {
        let mut map = make_map();
        map.extend((0..10).map(|i| (i, i.to_string())));
        assert!(map.node_count() > 10);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.node_count(), 0);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn max_height_one_is_sorted_list() {
        let mut map = OwnedSkipList::with_max_height(SmallRng::seed_from_u64(1), 1);
        map.extend((0..100u64).map(|i| (i, i)));

        assert_eq!(map.height(), 1);
        assert_eq!(map.node_count(), 101);
        assert!((0..100).all(|k| map.tower_height(&k) == Some(1)));
    }
}
