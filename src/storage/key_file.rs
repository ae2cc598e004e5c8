//! Key files - newline-delimited lists of keys.
//!
//! Used to build a tree from a word list and to drive batches of deletes.
//!
//! # Format
//! ```text
//! password
//! 123456
//! letmein
//! ```
//! One key per line. A trailing `\r` is stripped so files written on
//! Windows load the same way. Empty lines are skipped; whitespace is
//! otherwise kept as part of the key.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{BTreeConfig, Error, Result};
use crate::index::btree::BTree;

/// Read every key from a key file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be opened or read (including
/// invalid UTF-8).
pub fn read_keys<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    parse_keys(BufReader::new(file))
}

/// Read keys from any buffered reader.
pub fn parse_keys<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    for line in reader.lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        if !line.is_empty() {
            keys.push(line);
        }
    }
    Ok(keys)
}

/// Outcome of [`load_tree`].
#[derive(Debug)]
pub struct LoadReport {
    /// The tree built from the file.
    pub tree: BTree<String>,
    /// Keys inserted.
    pub inserted: usize,
    /// Keys skipped because they were already present (only under
    /// `DuplicatePolicy::Reject`).
    pub skipped: usize,
}

/// Build a tree by inserting every key of a key file, in file order.
///
/// Repeated keys are skipped with a warning when the configuration rejects
/// duplicates; loading does not stop on them.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read.
pub fn load_tree<P: AsRef<Path>>(path: P, config: BTreeConfig) -> Result<LoadReport> {
    let path = path.as_ref();
    let keys = read_keys(path)?;
    let mut tree = BTree::with_config(config);
    let mut inserted = 0;
    let mut skipped = 0;

    for key in keys {
        match tree.insert(key) {
            Ok(()) => inserted += 1,
            Err(Error::DuplicateKey(key)) => {
                tracing::warn!(%key, file = %path.display(), "skipping duplicate key");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        file = %path.display(),
        inserted,
        skipped,
        height = tree.height(),
        "loaded key file"
    );

    Ok(LoadReport {
        tree,
        inserted,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DuplicatePolicy;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn key_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_keys_skips_empty_and_strips_cr() {
        let keys = parse_keys(Cursor::new("alpha\r\n\nbeta\n  \ngamma")).unwrap();
        assert_eq!(keys, vec!["alpha", "beta", "  ", "gamma"]);
    }

    #[test]
    fn test_read_keys_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_keys(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_tree() {
        let file = key_file("d\na\nb\ne\nc\nf\ng\nh\ni\n");

        let report = load_tree(file.path(), BTreeConfig::default()).unwrap();

        assert_eq!(report.inserted, 9);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.tree.len(), 9);
        report.tree.validate().unwrap();
    }

    #[test]
    fn test_load_tree_skips_duplicates_when_rejecting() {
        let file = key_file("x\ny\nx\nz\ny\n");

        let report = load_tree(file.path(), BTreeConfig::default()).unwrap();
        assert_eq!(report.inserted, 3);
        assert_eq!(report.skipped, 2);

        let config = BTreeConfig::default().with_duplicates(DuplicatePolicy::Allow);
        let report = load_tree(file.path(), config).unwrap();
        assert_eq!(report.inserted, 5);
        assert_eq!(report.skipped, 0);
    }
}
