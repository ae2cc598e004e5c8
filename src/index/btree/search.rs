//! The result of a successful search.

use std::fmt;

use super::node::Node;

/// A hit returned by [`Node::search`]: the node holding the key and the
/// key's index inside that node.
///
/// Borrows the tree, so it cannot outlive the next mutation.
#[derive(Debug)]
pub struct SearchHit<'a, K> {
    node: &'a Node<K>,
    index: usize,
}

impl<'a, K> SearchHit<'a, K> {
    pub(crate) fn new(node: &'a Node<K>, index: usize) -> Self {
        debug_assert!(index < node.len());
        Self { node, index }
    }

    /// The node that holds the key.
    #[inline]
    pub fn node(&self) -> &'a Node<K> {
        self.node
    }

    /// Index of the key within [`node`](Self::node).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stored key.
    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node.keys()[self.index]
    }

    /// The pair as a plain tuple.
    #[inline]
    pub fn into_parts(self) -> (&'a Node<K>, usize) {
        (self.node, self.index)
    }
}

// Manual impls: a hit is two pointers wide whatever `K` is.
impl<K> Clone for SearchHit<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SearchHit<'_, K> {}

impl<K> PartialEq for SearchHit<'_, K> {
    /// Two hits are equal when they point at the same slot of the same node.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node) && self.index == other.index
    }
}

impl<K> Eq for SearchHit<'_, K> {}

impl<K: fmt::Display> fmt::Display for SearchHit<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node Subtree: {}\nIndex: {}", self.node, self.index)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::MinDegree;
    use crate::index::btree::node::Node;

    fn leaf(keys: &[&'static str]) -> Node<&'static str> {
        let mut node = Node::new(MinDegree::MIN);
        for key in keys {
            node.insert(*key);
        }
        node
    }

    #[test]
    fn test_hit_accessors() {
        let node = leaf(&["a", "b", "c"]);
        let hit = node.search(&"b").unwrap();

        assert_eq!(hit.index(), 1);
        assert_eq!(*hit.key(), "b");
        assert!(std::ptr::eq(hit.node(), &node));

        let (n, i) = hit.into_parts();
        assert!(std::ptr::eq(n, &node));
        assert_eq!(i, 1);
    }

    #[test]
    fn test_hit_equality_is_by_slot() {
        let node = leaf(&["a", "b"]);
        let other = leaf(&["a", "b"]);

        assert_eq!(node.search(&"a"), node.search(&"a"));
        assert_ne!(node.search(&"a"), node.search(&"b"));
        assert_ne!(node.search(&"a"), other.search(&"a"));
    }

    #[test]
    fn test_hit_display() {
        let node = leaf(&["x", "y"]);
        let hit = node.search(&"y").unwrap();
        assert_eq!(format!("{}", hit), "Node Subtree: x_0,y_0\nIndex: 1");
    }
}
