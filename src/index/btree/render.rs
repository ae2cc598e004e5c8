//! Textual dumps of a subtree.
//!
//! The canonical form is an in-order, comma-joined list of `key_depth`
//! tokens where the node `Display` is called on sits at depth 0:
//!
//! ```text
//!            [d]                 a_1,b_1,d_0,e_1,f_1
//!          /     \
//!      [a b]     [e f]
//! ```

use std::fmt;

use super::node::Node;

impl<K> Node<K> {
    /// Every key of the subtree in order, paired with its depth below this node.
    pub fn depth_pairs(&self) -> Vec<(&K, usize)> {
        let mut out = Vec::with_capacity(self.keys().len());
        self.collect_depth_pairs(0, &mut out);
        out
    }

    fn collect_depth_pairs<'a>(&'a self, depth: usize, out: &mut Vec<(&'a K, usize)>) {
        if self.is_leaf() {
            out.extend(self.keys().iter().map(|k| (k, depth)));
            return;
        }
        for (i, child) in self.children().enumerate() {
            child.collect_depth_pairs(depth + 1, out);
            if let Some(key) = self.keys().get(i) {
                out.push((key, depth));
            }
        }
    }

    /// Every key of the subtree in order.
    pub fn in_order(&self) -> Vec<&K> {
        self.depth_pairs().into_iter().map(|(k, _)| k).collect()
    }
}

impl<K: fmt::Display> Node<K> {
    /// One line per node, indented by depth, keys in brackets.
    ///
    /// ```text
    /// [d]
    ///   [a, b]
    ///   [e, f]
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let keys: Vec<String> = self.keys().iter().map(|k| k.to_string()).collect();
        out.push_str(&"  ".repeat(depth));
        out.push('[');
        out.push_str(&keys.join(", "));
        out.push_str("]\n");
        for child in self.children() {
            child.write_outline(out, depth + 1);
        }
    }
}

impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, depth)) in self.depth_pairs().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}_{}", key, depth)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::common::MinDegree;
    use crate::index::btree::node::Node;

    fn sample() -> Node<&'static str> {
        // [b] over [a] and [c, d]
        let t = MinDegree::MIN;
        let mut root = Node::new(t);
        for k in ["a", "b", "c"] {
            root.insert(k);
        }
        let mut root = Node::with_only_child(Box::new(root));
        root.split_child(0, &Default::default());
        root.insert("d");
        root
    }

    #[test]
    fn test_display_depth_tokens() {
        let root = sample();
        assert_eq!(root.to_string(), "a_1,b_0,c_1,d_1");
    }

    #[test]
    fn test_display_empty() {
        let n: Node<String> = Node::new(MinDegree::MIN);
        assert_eq!(n.to_string(), "");
    }

    #[test]
    fn test_depth_pairs_and_in_order() {
        let root = sample();
        let pairs: Vec<(&str, usize)> = root.depth_pairs().into_iter().map(|(k, d)| (*k, d)).collect();
        assert_eq!(pairs, vec![("a", 1), ("b", 0), ("c", 1), ("d", 1)]);
        assert_eq!(root.in_order(), vec![&"a", &"b", &"c", &"d"]);
    }

    #[test]
    fn test_outline() {
        let root = sample();
        assert_eq!(root.outline(), "[b]\n  [a]\n  [c, d]\n");
    }
}
