//! Custom error types for the npyfile crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum NpyError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The first six bytes of the file are not the npy magic signature.
    #[error("Not an npy file: bad magic bytes")]
    BadMagic,

    /// The file declares a format version newer than 2.0.
    #[error("Unsupported npy version {}.{}. Only versions up to 2.0 are supported.", .0 >> 8, .0 & 0xff)]
    UnsupportedVersion(u16),

    /// The header dictionary does not conform to the npy header grammar.
    #[error("Malformed header dictionary: {0}")]
    InvalidHeader(String),

    /// A buffer is smaller than the size implied by shape and element size.
    #[error("Size mismatch for {context}: expected {expected} bytes, but found {found} bytes")]
    SizeMismatch {
        context: &'static str,
        expected: u64,
        found: u64,
    },
}

/// A convenience `Result` type alias using the crate's `NpyError` type.
pub type Result<T> = std::result::Result<T, NpyError>;
