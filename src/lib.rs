//! keytree - An in-memory B-tree of ordered keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            keytree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Sharing Layer (concurrency/)                   │   │
//! │  │        SharedBTree = Arc<RwLock<BTree>>                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BTree (root grow/shrink)  →  Node (split/merge/borrow) │   │
//! │  │        SearchHit + TreeStats + render + validate         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Storage Layer (storage/)                       │   │
//! │  │          Key files → load_tree / read_keys               │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (MinDegree, Error, config)
//! - [`index`] - The B-tree itself
//! - [`storage`] - Key file loading
//! - [`concurrency`] - Thread-safe tree handle
//!
//! # Quick Start
//! ```
//! use keytree::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in ["d", "a", "b", "e", "c", "f", "g", "h", "i"] {
//!     tree.insert(key.to_string()).unwrap();
//! }
//! tree.delete(&"g".to_string());
//!
//! // In-order dump of `key_depth` tokens
//! println!("{}", tree);
//! ```

pub mod common;
pub mod concurrency;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_DEGREE, MIN_DEGREE_FLOOR};
pub use common::{BTreeConfig, DuplicatePolicy, Error, MinDegree, Result};

pub use concurrency::SharedBTree;
pub use index::btree::{BTree, KeyOrdering, Node, SearchHit, StatsSnapshot, TreeStats};
pub use storage::{load_tree, read_keys, LoadReport};
