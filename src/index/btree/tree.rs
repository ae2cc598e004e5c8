//! The tree shell around the root node.

use std::fmt::{self, Debug};
use std::mem;

use crate::common::{BTreeConfig, DuplicatePolicy, Error, MinDegree, Result};

use super::node::Node;
use super::search::SearchHit;
use super::stats::{StatsSnapshot, TreeStats};
use super::validate::KeyOrdering;

/// An in-memory B-tree of ordered keys.
///
/// The tree owns exactly one root node. The root is *replaced*, never
/// patched, when the tree changes height:
/// - before inserting into a full root, a new empty root adopts the old one
///   and splits it (height + 1)
/// - after a delete leaves the root with no keys and a single child, that
///   child becomes the root (height - 1)
///
/// # Thread Safety
/// `BTree` is single-threaded; mutation needs `&mut self`. Wrap it in a
/// [`SharedBTree`](crate::SharedBTree) to share it between threads.
///
/// # Example
/// ```
/// use keytree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in ["d", "a", "b", "e", "c"] {
///     tree.insert(key.to_string()).unwrap();
/// }
///
/// assert!(tree.contains(&"c".to_string()));
/// assert!(tree.delete(&"c".to_string()));
/// assert!(!tree.delete(&"c".to_string()));
/// assert_eq!(tree.len(), 4);
/// ```
#[derive(Debug)]
pub struct BTree<K = String> {
    root: Box<Node<K>>,
    config: BTreeConfig,
    len: usize,
    stats: TreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree with minimum degree `t` that rejects duplicates.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::with_config(BTreeConfig::new(t)?))
    }

    /// Create an empty tree from a full configuration.
    pub fn with_config(config: BTreeConfig) -> Self {
        Self {
            root: Box::new(Node::new(config.min_degree)),
            config,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    /// Number of keys stored (counting duplicates).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; an empty or single-leaf tree has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    #[inline]
    pub fn min_degree(&self) -> MinDegree {
        self.config.min_degree
    }

    #[inline]
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// The current root node.
    #[inline]
    pub fn root(&self) -> &Node<K> {
        &self.root
    }

    /// Structural counters since creation (or the last [`reset`](TreeStats::reset)).
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Shorthand for `stats().snapshot()`.
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Remove every key, keeping the configuration and statistics.
    pub fn clear(&mut self) {
        self.root = Box::new(Node::new(self.config.min_degree));
        self.len = 0;
    }

    /// Every key in order, paired with its depth (root = 0).
    pub fn depth_pairs(&self) -> Vec<(&K, usize)> {
        self.root.depth_pairs()
    }

    /// Every key in order.
    pub fn in_order(&self) -> Vec<&K> {
        self.root.in_order()
    }
}

impl<K: Ord> BTree<K> {
    /// Find `key`, returning the node that holds it and its index there.
    pub fn search(&self, key: &K) -> Option<SearchHit<'_, K>> {
        self.root.search(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Smallest key, or `None` for an empty tree.
    pub fn min(&self) -> Option<&K> {
        self.root.min_key()
    }

    /// Largest key, or `None` for an empty tree.
    pub fn max(&self) -> Option<&K> {
        self.root.max_key()
    }
}

impl<K: Ord + Clone + Debug> BTree<K> {
    /// Insert `key`.
    ///
    /// # Errors
    /// Returns `Error::DuplicateKey` if the key is already present and the
    /// tree is configured with [`DuplicatePolicy::Reject`]. The tree is
    /// unchanged in that case.
    pub fn insert(&mut self, key: K) -> Result<()> {
        if self.config.duplicates == DuplicatePolicy::Reject && self.contains(&key) {
            return Err(Error::DuplicateKey(format!("{key:?}")));
        }

        if self.root.is_full() {
            self.grow_root();
        }
        self.root.insert_with(key, &self.stats);
        self.len += 1;
        Ok(())
    }

    /// Insert every key from `keys`, stopping at the first error.
    ///
    /// Returns how many keys were inserted.
    pub fn extend_keys<I>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
    {
        let mut inserted = 0;
        for key in keys {
            self.insert(key)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Delete one occurrence of `key`.
    ///
    /// Returns `false` if the key is not in the tree; that is reported,
    /// not treated as an error, and no key is removed.
    pub fn delete(&mut self, key: &K) -> bool {
        let removed = self.root.delete_with(key, &self.stats);
        if removed {
            self.len -= 1;
        } else {
            tracing::debug!(?key, "delete: key is not in the tree");
        }

        if self.root.is_empty() && !self.root.is_leaf() {
            self.shrink_root();
        }
        removed
    }

    /// Check every structural invariant, plus the cached length.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` naming the first problem.
    pub fn validate(&self) -> Result<()> {
        let ordering = match self.config.duplicates {
            DuplicatePolicy::Reject => KeyOrdering::Strict,
            DuplicatePolicy::Allow => KeyOrdering::NonStrict,
        };
        self.root.validate(true, ordering)?;

        let counted = self.root.subtree_len();
        if counted != self.len {
            return Err(Error::InvariantViolation(format!(
                "tree reports {} keys but holds {}",
                self.len, counted
            )));
        }
        Ok(())
    }

    /// Put a new empty root above the full one and split it.
    fn grow_root(&mut self) {
        let old = mem::replace(&mut self.root, Box::new(Node::new(self.config.min_degree)));
        self.root = Box::new(Node::with_only_child(old));
        self.root.split_child(0, &self.stats);

        TreeStats::record(&self.stats.root_grows);
        tracing::debug!(height = self.root.height(), "root split, tree grew");
    }

    /// Replace a keyless root by its only child.
    fn shrink_root(&mut self) {
        let old = mem::replace(&mut self.root, Box::new(Node::new(self.config.min_degree)));
        self.root = match old.into_only_child() {
            Ok(child) => {
                TreeStats::record(&self.stats.root_shrinks);
                tracing::debug!(height = child.height(), "root emptied, tree shrank");
                child
            }
            Err(old) => old,
        };
    }
}

impl<K: fmt::Display> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(t: usize, keys: &[&'static str]) -> BTree<&'static str> {
        let mut tree = BTree::new(t).unwrap();
        tree.extend_keys(keys.iter().copied()).unwrap();
        tree
    }

    #[test]
    fn test_new_rejects_bad_degree() {
        assert!(matches!(
            BTree::<String>::new(1),
            Err(Error::InvalidMinDegree(1))
        ));
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<String> = BTree::new(2).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.to_string(), "");
        tree.validate().unwrap();
    }

    #[test]
    fn test_root_splits_when_full() {
        let mut tree = tree_of(2, &["a", "b", "c"]);
        assert_eq!(tree.height(), 1);

        tree.insert("d").unwrap();

        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root().keys(), &["b"]);
        assert_eq!(tree.stats_snapshot().root_grows, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_insert_rejects_duplicates_by_default() {
        let mut tree = tree_of(2, &["a", "b"]);

        let err = tree.insert("a").unwrap_err();

        assert!(matches!(err, Error::DuplicateKey(ref k) if k == "\"a\""));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_allow_duplicates_is_a_multiset() {
        let config = BTreeConfig::default().with_duplicates(DuplicatePolicy::Allow);
        let mut tree = BTree::with_config(config);
        for k in ["m", "m", "a", "m", "z", "m"] {
            tree.insert(k).unwrap();
        }
        tree.validate().unwrap();
        assert_eq!(tree.len(), 6);

        for remaining in (0..4).rev() {
            assert!(tree.delete(&"m"));
            tree.validate().unwrap();
            assert_eq!(tree.in_order().iter().filter(|k| ***k == "m").count(), remaining);
        }
        assert!(!tree.delete(&"m"));
        assert_eq!(tree.in_order(), vec![&"a", &"z"]);
    }

    #[test]
    fn test_delete_shrinks_root() {
        let mut tree = tree_of(2, &["a", "b", "c", "d"]);
        assert_eq!(tree.height(), 2);

        assert!(tree.delete(&"d"));
        assert!(tree.delete(&"c"));

        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root().keys(), &["a", "b"]);
        assert_eq!(tree.stats_snapshot().root_shrinks, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_missing_key() {
        let mut tree = tree_of(3, &["a", "b", "c"]);
        assert!(!tree.delete(&"x"));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.stats_snapshot().missed_deletes, 1);
    }

    #[test]
    fn test_delete_everything() {
        let keys = ["k", "c", "x", "a", "q", "m", "e", "t", "b", "z", "h", "p"];
        let mut tree = tree_of(2, &keys);

        for k in keys {
            assert!(tree.delete(&k), "missing {k}");
            tree.validate().unwrap();
            assert!(!tree.contains(&k));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_min_max_search() {
        let tree = tree_of(2, &["m", "c", "x", "a"]);
        assert_eq!(tree.min(), Some(&"a"));
        assert_eq!(tree.max(), Some(&"x"));

        let hit = tree.search(&"c").unwrap();
        assert_eq!(*hit.key(), "c");
        assert!(tree.search(&"d").is_none());
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(2, &["a", "b", "c", "d", "e"]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        tree.insert("a").unwrap();
        assert_eq!(tree.len(), 1);
    }
}
