//! A B-tree shared between threads.
//!
//! [`BTree`] has no internal locking; every mutation needs `&mut`. This
//! wrapper adds the external synchronization: one `RwLock` around the
//! whole tree, so searches run in parallel and mutations serialize.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{BTreeConfig, Result};
use crate::index::btree::{BTree, StatsSnapshot};

/// Cloneable handle to a lock-protected [`BTree`].
///
/// Clones share the same tree.
///
/// # Example
/// ```
/// use keytree::{BTreeConfig, SharedBTree};
///
/// let shared = SharedBTree::<String>::new(BTreeConfig::default());
/// let handle = shared.clone();
///
/// std::thread::spawn(move || {
///     handle.insert("k".to_string()).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert!(shared.contains(&"k".to_string()));
/// ```
#[derive(Debug)]
pub struct SharedBTree<K = String> {
    inner: Arc<RwLock<BTree<K>>>,
}

impl<K> SharedBTree<K> {
    /// Create an empty shared tree.
    pub fn new(config: BTreeConfig) -> Self {
        Self::from_tree(BTree::with_config(config))
    }

    /// Share an existing tree.
    pub fn from_tree(tree: BTree<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquire shared read access. Blocks while a writer holds the lock.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K>> {
        self.inner.read()
    }

    /// Acquire exclusive write access.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<K>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.read().stats_snapshot()
    }

    /// Take the tree back if this is the last handle.
    ///
    /// Returns `Err(self)` while other clones are alive.
    pub fn try_unwrap(self) -> std::result::Result<BTree<K>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<K: Ord> SharedBTree<K> {
    pub fn contains(&self, key: &K) -> bool {
        self.read().contains(key)
    }
}

impl<K: Ord + Clone> SharedBTree<K> {
    /// Copy of every key, in order, taken under one read lock.
    pub fn snapshot_keys(&self) -> Vec<K> {
        self.read().in_order().into_iter().cloned().collect()
    }
}

impl<K: Ord + Clone + Debug> SharedBTree<K> {
    /// Insert under the write lock.
    pub fn insert(&self, key: K) -> Result<()> {
        self.write().insert(key)
    }

    /// Delete under the write lock. Returns `false` if the key was absent.
    pub fn delete(&self, key: &K) -> bool {
        self.write().delete(key)
    }
}

impl<K> Clone for SharedBTree<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> From<BTree<K>> for SharedBTree<K> {
    fn from(tree: BTree<K>) -> Self {
        Self::from_tree(tree)
    }
}
