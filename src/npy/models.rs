//! Data structures representing npy format components

use super::error::{NpyError, Result};
use super::NPY_VERSION;

/// An in-memory npy array.
///
/// `descr` is the dtype descriptor string (e.g. `<f8`), stored and echoed
/// verbatim; this crate never interprets it. `data` holds the raw payload
/// exactly as found on disk — its length is not cross-checked against
/// `shape`, so a truncated file still loads and the caller decides what a
/// consistent payload looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpyArray {
    /// Opaque dtype descriptor.
    pub descr: String,
    /// True if the payload is laid out column-major (Fortran order).
    pub fortran_order: bool,
    /// One extent per dimension; empty for a scalar.
    pub shape: Vec<u64>,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl NpyArray {
    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements implied by the shape.
    ///
    /// An empty shape denotes a scalar holding exactly one element.
    pub fn elem_count(&self) -> u64 {
        self.shape.iter().product()
    }
}

/// The npy format version, which determines the header-length field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpyVersion {
    V1,
    V2,
}

impl NpyVersion {
    /// Width (in bytes) of the little-endian header-length field.
    pub fn header_len_width(&self) -> usize {
        match self {
            NpyVersion::V1 => 2,
            NpyVersion::V2 => 4,
        }
    }
}

impl TryFrom<u16> for NpyVersion {
    type Error = NpyError;

    /// Classify a combined `major * 256 + minor` version number.
    fn try_from(version: u16) -> Result<Self> {
        if version > NPY_VERSION {
            Err(NpyError::UnsupportedVersion(version))
        } else if version >= 0x0200 {
            Ok(Self::V2)
        } else {
            Ok(Self::V1)
        }
    }
}
