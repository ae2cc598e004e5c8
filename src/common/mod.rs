//! Common types and utilities shared across keytree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`BTreeConfig`]
//! - Error types
//! - [`MinDegree`], the validated tree parameter `t`

pub mod config;
pub mod error;
mod min_degree;

pub use config::{BTreeConfig, DuplicatePolicy};
pub use error::{Error, Result};
pub use min_degree::MinDegree;
