//! B-tree node: ordered keys plus owned children.
//!
//! A [`Node`] is the unit of storage. It knows its own fill count and
//! leaf status and implements every structural primitive the tree needs:
//!
//! ```text
//!   insert:  split a full child *before* descending into it
//!
//!        [ .. m .. ]                 parent gains the median m
//!        /        \
//!   [a b c m d e f]     ──►     [a b c]  m  [d e f]
//!
//!   delete:  make sure a child has >= t keys *before* descending into it
//!
//!     borrow (rotate through parent)     merge (pull separator down)
//!       [ p ]          [ s ]               [ p ]
//!      /     \   ──►  /     \             /     \     ──►   [L p R]
//!    [x]   [s t]    [x p]   [t]         [L]     [R]
//! ```
//!
//! # Layout
//! `keys` is a `Vec` with capacity `2t - 1` and `children` a `Vec` with
//! capacity `2t`. Only the first `len()` keys exist; there are no
//! sentinel slots. A node is a leaf iff `children` is empty, otherwise it
//! has exactly `len() + 1` children. Children are owned through `Box`, so
//! split, merge and borrow move whole subtrees without copying them.

use std::mem;

use crate::common::{Error, MinDegree, Result};

use super::search::SearchHit;
use super::stats::TreeStats;

/// A B-tree node.
#[derive(Debug, Clone)]
pub struct Node<K> {
    min_degree: MinDegree,
    keys: Vec<K>,
    children: Vec<Box<Node<K>>>,
}

impl<K> Node<K> {
    /// Create an empty leaf.
    pub fn new(min_degree: MinDegree) -> Self {
        Self {
            min_degree,
            keys: Vec::with_capacity(min_degree.max_keys()),
            children: Vec::new(),
        }
    }

    /// Create an internal node with no keys whose only child is `child`.
    ///
    /// Used by the tree to grow a level before splitting a full root.
    pub(crate) fn with_only_child(child: Box<Node<K>>) -> Self {
        let min_degree = child.min_degree;
        let mut children = Vec::with_capacity(min_degree.max_children());
        children.push(child);
        Self {
            min_degree,
            keys: Vec::with_capacity(min_degree.max_keys()),
            children,
        }
    }

    // ========================================================================
    // Shape
    // ========================================================================

    /// The minimum degree `t` this node was built with.
    #[inline]
    pub fn min_degree(&self) -> MinDegree {
        self.min_degree
    }

    /// Number of populated keys (`n`).
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the node holds `2t - 1` keys.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.keys.len() == self.min_degree.max_keys()
    }

    /// The populated keys, in order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The populated children, in order. Empty for a leaf.
    pub fn children(&self) -> impl Iterator<Item = &Node<K>> + '_ {
        self.children.iter().map(|c| c.as_ref())
    }

    /// Number of child slots in use.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The key at index `i`.
    ///
    /// # Errors
    /// Returns `Error::IndexOutOfRange` if `i >= len()`.
    pub fn key(&self, i: usize) -> Result<&K> {
        self.keys.get(i).ok_or(Error::IndexOutOfRange {
            index: i,
            len: self.keys.len(),
        })
    }

    /// The child at index `i`.
    ///
    /// # Errors
    /// Returns `Error::IndexOutOfRange` if `i > len()` or the node is a leaf.
    pub fn child(&self, i: usize) -> Result<&Node<K>> {
        self.children
            .get(i)
            .map(|c| c.as_ref())
            .ok_or(Error::IndexOutOfRange {
                index: i,
                len: self.children.len(),
            })
    }

    /// Number of levels below and including this node.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
            height += 1;
        }
        height
    }

    /// Total number of keys in this subtree.
    pub fn subtree_len(&self) -> usize {
        self.keys.len() + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Smallest key in this subtree, found by walking leftmost children.
    pub fn min_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
        }
        node.keys.first()
    }

    /// Largest key in this subtree, found by walking rightmost children.
    pub fn max_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(last) = node.children.last() {
            node = last;
        }
        node.keys.last()
    }

    /// Take the single child out of an internal node that has no keys left.
    ///
    /// Returns `Err(self)` if the node still has keys or is a leaf.
    pub(crate) fn into_only_child(mut self: Box<Self>) -> std::result::Result<Box<Node<K>>, Box<Self>> {
        if self.keys.is_empty() && self.children.len() == 1 {
            if let Some(child) = self.children.pop() {
                return Ok(child);
            }
        }
        Err(self)
    }
}

impl<K: Ord> Node<K> {
    // ========================================================================
    // Search
    // ========================================================================

    /// Index of the first key `>= key`, or `len()` if every key is smaller.
    ///
    /// This is also the index of the child whose subtree `key` belongs in.
    #[inline]
    pub fn expected_index(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Search this subtree for `key`.
    pub fn search(&self, key: &K) -> Option<SearchHit<'_, K>> {
        let i = self.expected_index(key);
        if i < self.keys.len() && self.keys[i] == *key {
            return Some(SearchHit::new(self, i));
        }
        if self.is_leaf() {
            return None;
        }
        self.children[i].search(key)
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert `key` into this subtree.
    ///
    /// The caller must ensure this node is not full; the tree does this for
    /// the root, and every node does it for the child it descends into.
    /// Keys equal to an existing key land immediately after it.
    ///
    /// # Panics
    ///
    /// Panics if this node already holds `2t-1` keys. [`BTree::insert`]
    /// grows the root first and never hits this.
    ///
    /// [`BTree::insert`]: crate::BTree::insert
    pub fn insert(&mut self, key: K) {
        assert!(!self.is_full(), "insert into a full node");
        self.insert_with(key, &TreeStats::new());
    }

    pub(crate) fn insert_with(&mut self, key: K, stats: &TreeStats) {
        debug_assert!(!self.is_full(), "insert into a full node");

        if self.is_leaf() {
            let pos = self.keys.partition_point(|k| *k <= key);
            self.keys.insert(pos, key);
            return;
        }

        let mut i = self.keys.partition_point(|k| *k <= key);
        if self.children[i].is_full() {
            self.split_child(i, stats);
            if key >= self.keys[i] {
                i += 1;
            }
        }
        self.children[i].insert_with(key, stats);
    }

    /// Split the full child at `idx` around its median.
    ///
    /// The median (child key `t-1`) moves up into this node at `idx`; a new
    /// right sibling takes keys `t..2t-1` and, for an internal child,
    /// children `t..2t`. The sibling is installed at child slot `idx + 1`.
    pub(crate) fn split_child(&mut self, idx: usize, stats: &TreeStats) {
        debug_assert!(!self.is_full(), "parent of a split must have room");
        let degree = self.min_degree;
        let t = degree.get();

        let child = &mut self.children[idx];
        debug_assert!(child.is_full(), "only full children are split");

        let mut sibling = Node::new(degree);
        sibling.keys.extend(child.keys.drain(t..));
        if !child.is_leaf() {
            sibling.children.reserve_exact(degree.max_children());
            sibling.children.extend(child.children.drain(t..));
        }
        let median = child.keys.remove(t - 1);

        debug_assert_eq!(child.keys.len(), degree.min_keys());
        debug_assert_eq!(sibling.keys.len(), degree.min_keys());

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, Box::new(sibling));

        TreeStats::record(&stats.splits);
        tracing::trace!(index = idx, "split child");
    }
}

impl<K: Ord + Clone> Node<K> {
    // ========================================================================
    // Delete
    // ========================================================================

    /// Delete one occurrence of `key` from this subtree.
    ///
    /// Returns `false` if the key is absent. No key is removed then, but
    /// children on the search path may still have been merged or refilled.
    ///
    /// Every child is brought up to at least `t` keys before the walk
    /// enters it, so a leaf can always give up a key. This node itself must
    /// already hold `t` keys unless it is the root. When a root ends up with
    /// no keys and a single child, the caller replaces it with that child.
    pub fn delete(&mut self, key: &K) -> bool {
        self.delete_with(key, &TreeStats::new())
    }

    pub(crate) fn delete_with(&mut self, key: &K, stats: &TreeStats) -> bool {
        let idx = self.expected_index(key);
        let found = idx < self.keys.len() && self.keys[idx] == *key;

        if found {
            if self.is_leaf() {
                self.remove_key(idx);
                return true;
            }
            return self.delete_internal(idx, key, stats);
        }

        if self.is_leaf() {
            TreeStats::record(&stats.missed_deletes);
            return false;
        }

        // The key is not here: descend into the child left of the first
        // greater key, topping it up first.
        let idx = self.fill_child(idx, stats);
        self.children[idx].delete_with(key, stats)
    }

    /// Remove the key at `idx` from a leaf, shifting later keys left.
    fn remove_key(&mut self, idx: usize) -> K {
        debug_assert!(self.is_leaf());
        self.keys.remove(idx)
    }

    /// Delete `keys[idx]` (equal to `key`) from this internal node.
    fn delete_internal(&mut self, idx: usize, key: &K, stats: &TreeStats) -> bool {
        let t = self.min_degree.get();

        if self.children[idx].len() >= t {
            if let Some(pred) = self.children[idx].max_key().cloned() {
                let removed = self.children[idx].delete_with(&pred, stats);
                debug_assert!(removed, "predecessor vanished");
                self.keys[idx] = pred;
                return true;
            }
        }

        if self.children[idx + 1].len() >= t {
            if let Some(succ) = self.children[idx + 1].min_key().cloned() {
                let removed = self.children[idx + 1].delete_with(&succ, stats);
                debug_assert!(removed, "successor vanished");
                self.keys[idx] = succ;
                return true;
            }
        }

        // Both neighbours hold t-1 keys: fold the key down between them.
        self.merge_children(idx, stats);
        self.children[idx].delete_with(key, stats)
    }

    /// Make sure `children[idx]` holds at least `t` keys.
    ///
    /// Returns the index of the child that now covers the old child's key
    /// range: unchanged after a borrow or a merge with the right sibling,
    /// `idx - 1` after a merge with the left sibling.
    fn fill_child(&mut self, idx: usize, stats: &TreeStats) -> usize {
        let t = self.min_degree.get();
        if self.children[idx].len() >= t {
            return idx;
        }

        let last = self.keys.len();
        if idx < last && self.children[idx + 1].len() >= t {
            self.borrow_from_right(idx, stats);
            idx
        } else if idx > 0 && self.children[idx - 1].len() >= t {
            self.borrow_from_left(idx, stats);
            idx
        } else if idx < last {
            self.merge_children(idx, stats);
            idx
        } else {
            self.merge_children(idx - 1, stats);
            idx - 1
        }
    }

    /// Rotate the right sibling's minimum through `keys[idx]` into
    /// `children[idx]`.
    fn borrow_from_right(&mut self, idx: usize, stats: &TreeStats) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];
        debug_assert!(sibling.len() > sibling.min_degree.min_keys());

        let up = sibling.keys.remove(0);
        let down = mem::replace(&mut self.keys[idx], up);
        child.keys.push(down);

        if !sibling.is_leaf() {
            child.children.push(sibling.children.remove(0));
        }

        TreeStats::record(&stats.borrows);
        tracing::trace!(index = idx, "borrowed from right sibling");
    }

    /// Rotate the left sibling's maximum through `keys[idx - 1]` into
    /// `children[idx]`.
    fn borrow_from_left(&mut self, idx: usize, stats: &TreeStats) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];
        debug_assert!(sibling.len() > sibling.min_degree.min_keys());

        let last = sibling.keys.len() - 1;
        let up = sibling.keys.remove(last);
        let down = mem::replace(&mut self.keys[idx - 1], up);
        child.keys.insert(0, down);

        if !sibling.is_leaf() {
            let last = sibling.children.len() - 1;
            let moved = sibling.children.remove(last);
            child.children.insert(0, moved);
        }

        TreeStats::record(&stats.borrows);
        tracing::trace!(index = idx, "borrowed from left sibling");
    }

    /// Merge `children[idx]`, `keys[idx]` and `children[idx + 1]` into one
    /// node stored at `children[idx]`.
    ///
    /// The separator becomes the merged node's key at offset `t - 1`. The
    /// right node is absorbed and dropped.
    fn merge_children(&mut self, idx: usize, stats: &TreeStats) {
        debug_assert!(idx < self.keys.len());

        let right = self.children.remove(idx + 1);
        let separator = self.keys.remove(idx);
        let left = &mut self.children[idx];

        debug_assert_eq!(left.is_leaf(), right.is_leaf());
        debug_assert!(left.len() + right.len() < left.min_degree.max_keys());

        let Node { keys, children, .. } = *right;
        left.keys.push(separator);
        left.keys.extend(keys);
        left.children.extend(children);

        TreeStats::record(&stats.merges);
        tracing::trace!(index = idx, "merged children");
    }
}
