//! In-memory B-tree index.
//!
//! # Components
//! - [`BTree`] - Owns the root; grows and shrinks the tree by one level
//! - [`Node`] - Keys, children and the split/merge/borrow primitives
//! - [`SearchHit`] - Node + key index returned by a successful search
//! - [`TreeStats`] - Counters for splits, merges, borrows and root changes
//!
//! Rendering (`key_depth` dumps) and structural validation live in their
//! own files as extra `impl Node` blocks.

mod node;
mod render;
mod search;
mod stats;
mod tree;
mod validate;

pub use node::Node;
pub use search::SearchHit;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BTree;
pub use validate::KeyOrdering;
