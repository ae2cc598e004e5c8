//! Storage layer - getting keys in from files.
//!
//! Trees live in memory only; this module reads the newline-delimited key
//! files used to build them and to drive delete batches:
//! - [`read_keys`] / [`parse_keys`] - Key file parsing
//! - [`load_tree`] - Build a [`BTree`](crate::BTree) from a key file

mod key_file;

pub use key_file::{load_tree, parse_keys, read_keys, LoadReport};
