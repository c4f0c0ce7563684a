//! Core npy module
//!
//! # File Structure
//!
//! ```text
//! ┌──────────────────┐
//! │  Preamble        │ ← header::read_preamble()
//! │  (magic, version,│
//! │   header length) │
//! ├──────────────────┤
//! │  Header dict     │ ← dict::parse()
//! │  (descr, order,  │
//! │   shape; padded) │
//! ├──────────────────┤
//! │  Payload         │ ← raw bytes to end of file
//! └──────────────────┘
//! ```

pub mod error;
pub mod models;
mod dict;
mod header;
mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use byteorder::ReadBytesExt;
use log::{debug, info};

use error::{NpyError, Result};
use models::NpyArray;

pub use writer::write_array;

/// The npy magic number.
pub(crate) const MAGIC: [u8; 6] = *b"\x93NUMPY";

/// Highest format version understood, as `major * 256 + minor`.
pub(crate) const NPY_VERSION: u16 = 0x0200;

/// Reads an npy array from a reader positioned at the start of the file.
///
/// The payload is whatever remains of the stream after the header; it is not
/// cross-checked against the declared shape.
pub fn read_array<R: Read>(reader: &mut R) -> Result<NpyArray> {
    let (version, header_len) = header::read_preamble(reader)?;
    debug!("npy preamble: version={:?}, header_len={}", version, header_len);

    let mut header_bytes = vec![0u8; header_len as usize];
    reader.read_exact(&mut header_bytes).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            NpyError::InvalidHeader("unexpected end of header".to_string())
        } else {
            NpyError::Io(e)
        }
    })?;

    let fields = dict::parse(&header_bytes)?;

    // The header region normally ends with the padding newline. If the
    // length field undercounted, sync forward to the newline separating the
    // header from the payload.
    if header_bytes.last() != Some(&b'\n') {
        while reader.read_u8()? != b'\n' {}
    }

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    debug!(
        "npy array: descr='{}', fortran_order={}, shape={:?}, {} payload bytes",
        fields.descr,
        fields.fortran_order,
        fields.shape,
        data.len()
    );

    Ok(NpyArray {
        descr: fields.descr,
        fortran_order: fields.fortran_order,
        shape: fields.shape,
        data,
    })
}

/// Loads an npy array from a file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be opened
/// - The magic signature or version is wrong
/// - The header dictionary is malformed or truncated
///
/// No partially populated array is ever returned.
pub fn load(path: impl AsRef<Path>) -> Result<NpyArray> {
    let path = path.as_ref();
    info!("Loading npy file: {}", path.display());
    let mut reader = BufReader::new(File::open(path)?);
    read_array(&mut reader)
}

/// Saves an array to a file in npy format.
///
/// `elem_size` is the size in bytes of one element; it is not stored in the
/// format and cannot be derived from `descr` by this crate, so the caller
/// must supply a value consistent with the descriptor. Exactly
/// `elem_size * product(shape)` bytes of `arr.data` are written.
///
/// # Errors
/// Returns an error if the destination cannot be created, a write fails, or
/// `arr.data` is shorter than the computed payload size.
pub fn save(arr: &NpyArray, path: impl AsRef<Path>, elem_size: usize) -> Result<()> {
    let path = path.as_ref();
    info!("Saving npy file: {}", path.display());
    let mut out = BufWriter::new(File::create(path)?);
    writer::write_array(&mut out, arr, elem_size)?;
    out.flush()?;
    Ok(())
}
