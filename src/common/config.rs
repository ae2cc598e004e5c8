//! Configuration for keytree.
//!
//! A tree is configured by its minimum degree and its duplicate-key policy.
//! Both can be taken from the environment:
//!
//! - `KEYTREE_MIN_DEGREE`: minimum degree `t` (default: `2`)
//! - `KEYTREE_DUPLICATES`: `reject` or `allow` (default: `reject`)

use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};
use super::min_degree::MinDegree;

/// Smallest legal minimum degree.
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Minimum degree used when none is configured.
pub const DEFAULT_MIN_DEGREE: usize = 2;

/// Environment variable holding the minimum degree.
pub const ENV_MIN_DEGREE: &str = "KEYTREE_MIN_DEGREE";

/// Environment variable holding the duplicate-key policy.
pub const ENV_DUPLICATES: &str = "KEYTREE_DUPLICATES";

/// What `insert` does with a key that is already in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Set semantics: inserting an existing key fails with `Error::DuplicateKey`.
    #[default]
    Reject,
    /// Multiset semantics: equal keys sit next to each other and `delete`
    /// removes one occurrence at a time.
    Allow,
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "allow" => Ok(DuplicatePolicy::Allow),
            other => Err(Error::Config {
                name: ENV_DUPLICATES.to_string(),
                message: format!("expected 'reject' or 'allow', got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Allow => write!(f, "allow"),
        }
    }
}

/// Tree configuration.
///
/// # Example
/// ```
/// use keytree::{BTreeConfig, DuplicatePolicy};
///
/// let config = BTreeConfig::default()
///     .with_min_degree(3)
///     .unwrap()
///     .with_duplicates(DuplicatePolicy::Allow);
/// assert_eq!(config.min_degree.get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BTreeConfig {
    /// Minimum degree `t` shared by every node in the tree.
    pub min_degree: MinDegree,
    /// Duplicate-key handling for `insert`.
    pub duplicates: DuplicatePolicy,
}

impl BTreeConfig {
    /// Configuration with the given degree and the default policy.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self {
            min_degree: MinDegree::new(t)?,
            duplicates: DuplicatePolicy::default(),
        })
    }

    /// Replace the minimum degree.
    pub fn with_min_degree(mut self, t: usize) -> Result<Self> {
        self.min_degree = MinDegree::new(t)?;
        Ok(self)
    }

    /// Replace the duplicate-key policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Load configuration from `KEYTREE_*` environment variables.
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    /// Returns `Error::Config` if a variable is set but cannot be parsed,
    /// or `Error::InvalidMinDegree` if the degree is below 2.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MIN_DEGREE) {
            let t = raw.trim().parse::<usize>().map_err(|e| Error::Config {
                name: ENV_MIN_DEGREE.to_string(),
                message: format!("'{raw}' is not a positive integer ({e})"),
            })?;
            config.min_degree = MinDegree::new(t)?;
        }

        if let Some(raw) = lookup(ENV_DUPLICATES) {
            config.duplicates = raw.parse()?;
        }

        Ok(config)
    }
}
