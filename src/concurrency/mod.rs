//! Sharing trees across threads.
//!
//! The tree itself is single-threaded. [`SharedBTree`] serializes writers
//! behind a `parking_lot::RwLock` and lets readers run together.

mod shared_tree;

pub use shared_tree::SharedBTree;
