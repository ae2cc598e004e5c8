//! Index structures.
//!
//! - [`btree`] - Classic minimum-degree B-tree (CLRS style)

pub mod btree;
