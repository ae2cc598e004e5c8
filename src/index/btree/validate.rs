//! Structural invariant checks.
//!
//! [`Node::validate`] walks a subtree and reports the first broken
//! invariant:
//! - key count: `t-1 <= n <= 2t-1` for non-root nodes, `n <= 2t-1` for the root
//! - child count: an internal node has `n + 1` children
//! - order: keys increase, and every key sits between its parent's bounding keys
//! - balance: every leaf is at the same depth
//! - every node shares the root's minimum degree

use std::fmt::Debug;

use crate::common::{Error, MinDegree, Result};

use super::node::Node;

/// How equal neighbouring keys are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrdering {
    /// Keys strictly increase (set semantics).
    Strict,
    /// Equal keys may sit next to each other (multiset semantics).
    NonStrict,
}

impl KeyOrdering {
    fn in_order<K: Ord>(self, lo: &K, hi: &K) -> bool {
        match self {
            KeyOrdering::Strict => lo < hi,
            KeyOrdering::NonStrict => lo <= hi,
        }
    }
}

struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K: Ord + Debug> Node<K> {
    /// Check every B-tree invariant for the subtree rooted here.
    ///
    /// Returns the subtree height (1 for a lone leaf) on success.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` describing the first problem found.
    pub fn validate(&self, is_root: bool, ordering: KeyOrdering) -> Result<usize> {
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        self.validate_node(is_root, ordering, self.min_degree(), &bounds, 0)
    }

    fn validate_node(
        &self,
        is_root: bool,
        ordering: KeyOrdering,
        degree: MinDegree,
        bounds: &Bounds<'_, K>,
        depth: usize,
    ) -> Result<usize> {
        let violation = |msg: String| Error::InvariantViolation(format!("depth {depth}: {msg}"));
        let keys = self.keys();
        let n = keys.len();

        if self.min_degree() != degree {
            return Err(violation(format!(
                "node built with {} inside a {} tree",
                self.min_degree(),
                degree
            )));
        }
        if n > degree.max_keys() {
            return Err(violation(format!("{n} keys exceeds capacity {}", degree.max_keys())));
        }
        if !is_root && n < degree.min_keys() {
            return Err(violation(format!("{n} keys is below minimum {}", degree.min_keys())));
        }
        if is_root && !self.is_leaf() && n == 0 {
            return Err(violation("internal root has no keys".to_string()));
        }

        for pair in keys.windows(2) {
            if !ordering.in_order(&pair[0], &pair[1]) {
                return Err(violation(format!("keys out of order: {:?} then {:?}", pair[0], pair[1])));
            }
        }
        if let (Some(lower), Some(first)) = (bounds.lower, keys.first()) {
            if !ordering.in_order(lower, first) {
                return Err(violation(format!("key {first:?} not above parent key {lower:?}")));
            }
        }
        if let (Some(upper), Some(last)) = (bounds.upper, keys.last()) {
            if !ordering.in_order(last, upper) {
                return Err(violation(format!("key {last:?} not below parent key {upper:?}")));
            }
        }

        if self.is_leaf() {
            return Ok(1);
        }

        if self.child_count() != n + 1 {
            return Err(violation(format!(
                "{} children for {n} keys",
                self.child_count()
            )));
        }

        let mut height = None;
        for (i, child) in self.children().enumerate() {
            let child_bounds = Bounds {
                lower: if i == 0 { bounds.lower } else { keys.get(i - 1) },
                upper: if i == n { bounds.upper } else { keys.get(i) },
            };
            let h = child.validate_node(false, ordering, degree, &child_bounds, depth + 1)?;
            match height {
                None => height = Some(h),
                Some(expected) if expected != h => {
                    return Err(violation(format!(
                        "child {i} has height {h}, its siblings {expected}"
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(height.unwrap_or(0) + 1)
    }
}
