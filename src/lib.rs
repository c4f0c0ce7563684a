//! # npyfile
//!
//! A reader and writer for numpy's `.npy` array format.
//!
//! The format is self-describing: a fixed magic signature, a version, a
//! length-prefixed textual header dictionary (dtype descriptor, storage
//! order, shape), then the raw contiguous payload. The dtype descriptor is
//! stored and echoed verbatim; interpreting it (and supplying a matching
//! element size at save time) is the caller's job.
//!
//! ```no_run
//! use npyfile::{load, save, NpyArray};
//!
//! let arr = NpyArray {
//!     descr: "<f8".to_string(),
//!     fortran_order: false,
//!     shape: vec![2, 3],
//!     data: vec![0u8; 48],
//! };
//! save(&arr, "zeros.npy", 8)?;
//!
//! let back = load("zeros.npy")?;
//! assert_eq!(back.shape, vec![2, 3]);
//! # Ok::<(), npyfile::NpyError>(())
//! ```
pub mod npy;

// Re-export the main types for convenience
pub use npy::{
    error::{NpyError, Result},
    load,
    models::{NpyArray, NpyVersion},
    read_array, save, write_array,
};
