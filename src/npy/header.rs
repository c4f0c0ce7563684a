//! Preamble parsing: magic signature, version, header-length field.

use std::io::{ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use super::error::{NpyError, Result};
use super::models::NpyVersion;
use super::MAGIC;

/// Parses the fixed-format preamble at the start of an npy file.
///
/// # Preamble Structure
/// ```text
/// [6 bytes] Magic signature "\x93NUMPY"
/// [1 byte ] Major version
/// [1 byte ] Minor version
/// [2 or 4 bytes] Header length (little-endian; 2 bytes for v1, 4 for v2+)
/// ```
///
/// # Returns
/// The classified version and the header length, i.e. the exact byte count
/// of the dictionary text that follows (padding and newline included).
///
/// # Errors
/// Returns an error if:
/// - The magic bytes are missing or wrong
/// - The version is newer than 2.0
/// - The stream ends inside the preamble
pub fn read_preamble<R: Read>(reader: &mut R) -> Result<(NpyVersion, u32)> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic).map_err(|e| {
        // A file shorter than the signature is not an npy file either.
        if e.kind() == ErrorKind::UnexpectedEof {
            NpyError::BadMagic
        } else {
            NpyError::Io(e)
        }
    })?;
    if magic != MAGIC {
        return Err(NpyError::BadMagic);
    }

    let major = reader.read_u8()?;
    let minor = reader.read_u8()?;
    let combined = (u16::from(major) << 8) | u16::from(minor);
    let version = NpyVersion::try_from(combined)?;
    trace!("npy version {}.{} ({:?})", major, minor, version);

    let header_len = match version.header_len_width() {
        4 => reader.read_u32::<LittleEndian>()?,
        _ => u32::from(reader.read_u16::<LittleEndian>()?),
    };
    trace!("npy header length: {} bytes", header_len);

    Ok((version, header_len))
}
