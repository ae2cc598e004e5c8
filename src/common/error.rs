//! Error types for keytree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in keytree.
///
/// A missing key on delete is *not* an error: it is reported through the
/// boolean returned by `delete` and leaves the tree unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a key file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The minimum degree must be at least 2.
    #[error("invalid minimum degree {0}: must be at least 2")]
    InvalidMinDegree(usize),

    /// A key or child slot outside the populated range was requested.
    ///
    /// This indicates a caller bug.
    #[error("index {index} out of range (n: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The key is already present and the tree rejects duplicates.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The structural validator found a broken B-tree invariant.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),

    /// A configuration value could not be parsed.
    #[error("invalid value for {name}: {message}")]
    Config { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(format!("{}", err), "index 5 out of range (n: 3)");

        let err = Error::InvalidMinDegree(1);
        assert_eq!(
            format!("{}", err),
            "invalid minimum degree 1: must be at least 2"
        );

        let err = Error::DuplicateKey("\"abc\"".to_string());
        assert_eq!(format!("{}", err), "duplicate key: \"abc\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::from(io_err);
        assert!(err.source().is_some());
        assert!(Error::InvalidMinDegree(0).source().is_none());
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
