//! The contract shared by every ordered map in this crate.

use crate::coin::Coin;
use crate::owned::OwnedSkipList;
use crate::rbtree::RedBlackTree;

/// A map from ordered keys to values.
///
/// Implemented by [`OwnedSkipList`] and [`RedBlackTree`], so one set of
/// tests or benchmarks can drive either.
///
/// # Example
///
/// ```
/// use strata_collections::{OrderedMap, RedBlackTree};
///
/// fn load<M: OrderedMap<u32, &'static str>>(map: &mut M) {
///     map.insert(2, "b");
///     map.insert(1, "a");
/// }
///
/// let mut tree = RedBlackTree::new();
/// load(&mut tree);
/// assert_eq!(OrderedMap::get(&tree, &1), Some(&"a"));
/// ```
pub trait OrderedMap<K, V> {
    /// Inserts a key-value pair, returning the previous value if present.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, or `None` if absent.
    fn get(&self, key: &K) -> Option<&V>;

    /// Removes `key` and returns its value, or `None` if absent.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Number of keys.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if the map holds no key.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, M: OrderedMap<K, V> + ?Sized> OrderedMap<K, V> for &mut M {
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        (**self).insert(key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        (**self).get(key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        (**self).contains_key(key)
    }
}

impl<K, V, C> OrderedMap<K, V> for OwnedSkipList<K, V, C>
where
    K: Ord + Clone,
    V: Clone,
    C: Coin,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        OwnedSkipList::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        OwnedSkipList::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        OwnedSkipList::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        OwnedSkipList::len(self)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        OwnedSkipList::contains_key(self, key)
    }
}

impl<K: Ord, V> OrderedMap<K, V> for RedBlackTree<K, V> {
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        RedBlackTree::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        RedBlackTree::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        RedBlackTree::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }
}
