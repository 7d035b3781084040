//! Left-leaning red-black tree.
//!
//! A balanced binary search tree that encodes a 2-3 tree: a red link glues
//! two nodes into one 3-node. Red links always lean left, no node touches two
//! red links, and every path from the root to an empty link crosses the same
//! number of black links. Height stays below `2 lg n`.
//!
//! Unlike [`SkipList`](crate::SkipList), the tree owns its nodes directly and
//! needs no random source; it serves as the deterministic counterpart behind
//! the same [`OrderedMap`](crate::OrderedMap) contract.
//!
//! # Example
//!
//! ```
//! use strata_collections::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for key in [5, 1, 9, 3] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.get(&3), Some(&30));
//! assert_eq!(tree.remove_min(), Some((1, 10)));
//! assert_eq!(tree.last(), Some((&9, &90)));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::mem;

use crate::error::InvariantViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    /// Color of the link from the parent.
    color: Color,
    /// Nodes in this subtree, self included.
    size: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: 1,
        })
    }

    #[inline]
    fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

// ============================================================================
// Link helpers
// ============================================================================

#[inline]
fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| n.color == Color::Red)
}

/// Whether the left child of `link` is red.
#[inline]
fn is_left_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| is_red(&n.left))
}

#[inline]
fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = h.right.take().expect("rotate_left without a right child");
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.left = Some(h);
    x
}

fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = h.left.take().expect("rotate_right without a left child");
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.right = Some(h);
    x
}

/// Splits or merges a 4-node by flipping a node and both children.
fn flip_colors<K, V>(h: &mut Node<K, V>) {
    h.color = h.color.flipped();
    if let Some(left) = h.left.as_mut() {
        left.color = left.color.flipped();
    }
    if let Some(right) = h.right.as_mut() {
        right.color = right.color.flipped();
    }
}

/// Restores the left-leaning shape on the way back up.
fn balance<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) && !is_red(&h.left) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && is_left_red(&h.left) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    h.update_size();
    h
}

/// Makes `h.left` or one of its children red, given `h` is red and both
/// `h.left` and `h.left.left` are black.
fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_left_red(&h.right) {
        let right = h.right.take().expect("checked by is_left_red");
        h.right = Some(rotate_right(right));
        h = rotate_left(h);
        flip_colors(&mut h);
    }
    h
}

/// Makes `h.right` or one of its children red, given `h` is red and both
/// `h.right` and `h.right.left` are black.
fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_left_red(&h.left) {
        h = rotate_right(h);
        flip_colors(&mut h);
    }
    h
}

// ============================================================================
// Recursive operations
// ============================================================================

fn insert_at<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    old: &mut Option<V>,
) -> Box<Node<K, V>> {
    let Some(mut h) = link else {
        return Node::new(key, value);
    };

    match key.cmp(&h.key) {
        Ordering::Less => h.left = Some(insert_at(h.left.take(), key, value, old)),
        Ordering::Greater => h.right = Some(insert_at(h.right.take(), key, value, old)),
        Ordering::Equal => *old = Some(mem::replace(&mut h.value, value)),
    }

    balance(h)
}

/// Detaches the smallest node of the subtree rooted at `h`.
fn remove_min_at<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    if h.left.is_none() {
        let rest = h.right.take();
        return (rest, h);
    }
    if !is_red(&h.left) && !is_left_red(&h.left) {
        h = move_red_left(h);
    }
    let left = h.left.take().expect("left child checked above");
    let (left, removed) = remove_min_at(left);
    h.left = left;
    (Some(balance(h)), removed)
}

/// Detaches the largest node of the subtree rooted at `h`.
fn remove_max_at<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    if is_red(&h.left) {
        h = rotate_right(h);
    }
    if h.right.is_none() {
        let rest = h.left.take();
        return (rest, h);
    }
    if !is_red(&h.right) && !is_left_red(&h.right) {
        h = move_red_right(h);
    }
    let right = h.right.take().expect("right child checked above");
    let (right, removed) = remove_max_at(right);
    h.right = right;
    (Some(balance(h)), removed)
}

/// Removes `key`, which must be present in the subtree rooted at `h`.
fn remove_at<K: Ord, V>(mut h: Box<Node<K, V>>, key: &K) -> (Link<K, V>, (K, V)) {
    if *key < h.key {
        if !is_red(&h.left) && !is_left_red(&h.left) {
            h = move_red_left(h);
        }
        let left = h.left.take().expect("key is in the left subtree");
        let (left, removed) = remove_at(left, key);
        h.left = left;
        return (Some(balance(h)), removed);
    }

    if is_red(&h.left) {
        h = rotate_right(h);
    }
    if *key == h.key && h.right.is_none() {
        let node = *h;
        return (node.left, (node.key, node.value));
    }
    if !is_red(&h.right) && !is_left_red(&h.right) {
        h = move_red_right(h);
    }

    let right = h.right.take().expect("key is at or right of this node");
    let removed = if *key == h.key {
        // Replace with the successor, then drop the successor's node.
        let (right, successor) = remove_min_at(right);
        h.right = right;
        let successor = *successor;
        (
            mem::replace(&mut h.key, successor.key),
            mem::replace(&mut h.value, successor.value),
        )
    } else {
        let (right, removed) = remove_at(right, key);
        h.right = right;
        removed
    };
    (Some(balance(h)), removed)
}

// ============================================================================
// RedBlackTree
// ============================================================================

/// An ordered map backed by a left-leaning red-black tree.
pub struct RedBlackTree<K, V> {
    root: Link<K, V>,
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns `true` if no key is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if the tree contains `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value for `key`, or `None` if absent.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
    }

    /// Returns the smallest key and its value.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the largest key and its value.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Inserts a key-value pair, returning the previous value if present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut old = None;
        let mut root = insert_at(self.root.take(), key, value, &mut old);
        root.color = Color::Black;
        self.root = Some(root);
        old
    }

    /// Removes and returns the smallest entry.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        let (root, removed) = remove_min_at(root);
        self.set_root(root);
        let removed = *removed;
        Some((removed.key, removed.value))
    }

    /// Removes and returns the largest entry.
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        let (root, removed) = remove_max_at(root);
        self.set_root(root);
        let removed = *removed;
        Some((removed.key, removed.value))
    }

    /// Removes `key` and returns its value, or `None` if absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let mut root = self.root.take()?;
        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        let (root, (_, value)) = remove_at(root, key);
        self.set_root(root);
        Some(value)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Returns an in-order iterator over key-value pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Checks ordering, coloring, black balance and subtree sizes.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if is_red(&self.root) {
            return Err(InvariantViolation::RedRoot);
        }

        let mut prev: Option<&K> = None;
        for (position, (key, _)) in self.iter().enumerate() {
            if prev.is_some_and(|prev| prev >= key) {
                return Err(InvariantViolation::OutOfOrder { level: 0, position });
            }
            prev = Some(key);
        }

        check_subtree(self.root.as_deref()).map(|_| ())
    }

    fn set_root(&mut self, mut root: Link<K, V>) {
        if let Some(node) = root.as_mut() {
            node.color = Color::Black;
        }
        self.root = root;
    }
}

/// Returns the black height of the subtree.
fn check_subtree<K, V>(node: Option<&Node<K, V>>) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };

    if is_red(&node.right) {
        return Err(InvariantViolation::RedRightLink);
    }
    if node.color == Color::Red && is_red(&node.left) {
        return Err(InvariantViolation::DoubleRed);
    }
    if node.size != 1 + size(&node.left) + size(&node.right) {
        return Err(InvariantViolation::SizeMismatch);
    }

    let left = check_subtree(node.left.as_deref())?;
    let right = check_subtree(node.right.as_deref())?;
    if left != right {
        return Err(InvariantViolation::BlackImbalance);
    }
    Ok(left + usize::from(node.color == Color::Black))
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over a [`RedBlackTree`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    #[test]
    fn empty_tree() {
        let mut tree: RedBlackTree<u64, u64> = RedBlackTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.get(&1), None);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.remove(&1), None);
        assert_eq!(tree.remove_min(), None);
        assert_eq!(tree.remove_max(), None);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn insert_replaces_value() {
        let mut tree = RedBlackTree::new();

        assert_eq!(tree.insert("a", 1), None);
        assert_eq!(tree.insert("a", 2), Some(1));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&"a"), Some(&2));
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = RedBlackTree::new();
        for i in 0..1024u64 {
            tree.insert(i, i);
            if i % 64 == 0 {
                tree.check_invariants().unwrap();
            }
        }

        tree.check_invariants().unwrap();
        assert_eq!(tree.len(), 1024);
        assert!(tree.iter().map(|(k, _)| *k).eq(0..1024));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut tree: RedBlackTree<u64, String> = (0..10).map(|i| (i, i.to_string())).collect();

        tree.get_mut(&4).unwrap().push('!');
        assert_eq!(tree.get(&4), Some(&"4!".into()));
        assert_eq!(tree.get_mut(&42), None);
    }

    #[test]
    fn remove_min_and_max_drain_in_order() {
        let mut tree: RedBlackTree<u64, u64> = [5, 3, 8, 1, 4, 7, 9, 2, 6]
            .into_iter()
            .map(|k| (k, k * 10))
            .collect();

        assert_eq!(tree.remove_min(), Some((1, 10)));
        assert_eq!(tree.remove_max(), Some((9, 90)));
        tree.check_invariants().unwrap();

        let mut drained = Vec::new();
        while let Some((k, _)) = tree.remove_min() {
            drained.push(k);
            tree.check_invariants().unwrap();
        }
        assert_eq!(drained, vec![2, 3, 4, 5, 6, 7, 8]);
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_every_key_in_shuffled_order() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut keys: Vec<u64> = (0..300).collect();
        let mut tree: RedBlackTree<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

        for i in (1..keys.len()).rev() {
            keys.swap(i, rng.random_range(0..=i));
        }

        for (n, key) in keys.iter().enumerate() {
            assert_eq!(tree.remove(key), Some(*key));
            assert_eq!(tree.remove(key), None);
            assert_eq!(tree.len(), 299 - n);
            tree.check_invariants().unwrap();
        }
    }

    #[test]
    fn stress_against_btreemap() {
        let mut rng = SmallRng::seed_from_u64(99999);
        let mut tree = RedBlackTree::new();
        let mut reference = BTreeMap::new();

        for step in 0..5000u64 {
            let key = rng.random_range(0..500u64);
            match rng.random_range(0..10) {
                0..=5 => assert_eq!(tree.insert(key, step), reference.insert(key, step)),
                6..=8 => assert_eq!(tree.remove(&key), reference.remove(&key)),
                _ => assert_eq!(tree.remove_min(), reference.pop_first()),
            }
        }

        tree.check_invariants().unwrap();
        assert!(tree.iter().map(|(k, v)| (*k, *v)).eq(reference.into_iter()));
    }

    #[test]
    fn detects_red_root() {
        let mut tree = RedBlackTree::new();
        tree.insert(1, ());
        tree.root.as_mut().unwrap().color = Color::Red;

        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn detects_red_right_link() {
        let mut tree = RedBlackTree::new();
        tree.insert(1, ());
        let root = tree.root.as_mut().unwrap();
        root.right = Some(Node::new(2, ()));
        root.size = 2;

        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRightLink));
    }

    #[test]
    fn detects_stale_size() {
        let mut tree: RedBlackTree<u64, ()> = (0..7).map(|k| (k, ())).collect();
        tree.root.as_mut().unwrap().size = 99;

        assert_eq!(tree.check_invariants(), Err(InvariantViolation::SizeMismatch));
    }
}
