//! Minimum degree type.

use std::fmt;

use super::config::MIN_DEGREE_FLOOR;
use super::error::{Error, Result};

/// The minimum degree `t` of a B-tree.
///
/// Every non-root node holds between `t - 1` and `2t - 1` keys, and an
/// internal node has exactly one more child than it has keys.
///
/// # Example
/// ```
/// use keytree::MinDegree;
///
/// let t = MinDegree::new(3).unwrap();
/// assert_eq!(t.max_keys(), 5);
/// assert_eq!(t.min_keys(), 2);
/// assert_eq!(t.max_children(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinDegree(usize);

impl MinDegree {
    /// The smallest legal degree (2-3-4 trees).
    pub const MIN: MinDegree = MinDegree(MIN_DEGREE_FLOOR);

    /// Create a new MinDegree.
    ///
    /// # Errors
    /// Returns `Error::InvalidMinDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        if t < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidMinDegree(t));
        }
        Ok(MinDegree(t))
    }

    /// The raw value of `t`.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Key capacity of a node: `2t - 1`.
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.0 - 1
    }

    /// Fewest keys a non-root node may hold: `t - 1`.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.0 - 1
    }

    /// Child capacity of a node: `2t`.
    #[inline]
    pub fn max_children(&self) -> usize {
        2 * self.0
    }
}

impl Default for MinDegree {
    fn default() -> Self {
        MinDegree::MIN
    }
}

impl TryFrom<usize> for MinDegree {
    type Error = Error;

    fn try_from(t: usize) -> Result<Self> {
        MinDegree::new(t)
    }
}

impl fmt::Display for MinDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_degree_new() {
        let t = MinDegree::new(4).unwrap();
        assert_eq!(t.get(), 4);
        assert_eq!(t.max_keys(), 7);
        assert_eq!(t.min_keys(), 3);
        assert_eq!(t.max_children(), 8);
    }

    #[test]
    fn test_min_degree_rejects_small() {
        assert!(matches!(MinDegree::new(0), Err(Error::InvalidMinDegree(0))));
        assert!(matches!(MinDegree::new(1), Err(Error::InvalidMinDegree(1))));
        assert!(MinDegree::new(2).is_ok());
    }

    #[test]
    fn test_min_degree_try_from() {
        let t: MinDegree = 3usize.try_into().unwrap();
        assert_eq!(t.get(), 3);
        assert!(MinDegree::try_from(1usize).is_err());
    }

    #[test]
    fn test_min_degree_default_and_display() {
        assert_eq!(MinDegree::default(), MinDegree::MIN);
        assert_eq!(format!("{}", MinDegree::MIN), "t=2");
    }
}
