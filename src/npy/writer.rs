//! Serialization to the npy format.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, trace};

use super::error::{NpyError, Result};
use super::models::NpyArray;
use super::MAGIC;

/// Renders the header dictionary text for an array.
///
/// Shape extents are comma-space separated; a one-dimensional shape is
/// rendered without the trailing comma Python would use for a 1-tuple. The
/// parser accepts both forms.
fn render_dict(arr: &NpyArray) -> String {
    let dims = arr
        .shape
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{{'descr': '{}', 'fortran_order': {}, 'shape': ({}), }}",
        arr.descr,
        if arr.fortran_order { "True" } else { "False" },
        dims
    )
}

/// Pads `unpadded` (dictionary text plus newline) with spaces so that the
/// whole header — magic, version, length field of `len_width` bytes, and the
/// header region itself — is a multiple of 16 bytes.
fn padded_header_len(unpadded: usize, len_width: usize) -> usize {
    let prefix = MAGIC.len() + 2 + len_width;
    let rem = (prefix + unpadded) % 16;
    if rem == 0 {
        unpadded
    } else {
        unpadded + (16 - rem)
    }
}

/// Writes an array in npy format.
///
/// Emits version 1.0 with a 2-byte header-length field unless the padded
/// header exceeds 65535 bytes, in which case version 2.0 with a 4-byte field
/// is chosen and the padding recomputed for the wider prefix.
///
/// Exactly `elem_size * product(shape)` bytes of `arr.data` are written
/// (an empty shape counts as one element); a shorter buffer is an error.
pub fn write_array<W: Write>(writer: &mut W, arr: &NpyArray, elem_size: usize) -> Result<()> {
    let payload_len = (elem_size as u64) * arr.elem_count();
    if (arr.data.len() as u64) < payload_len {
        return Err(NpyError::SizeMismatch {
            context: "array data",
            expected: payload_len,
            found: arr.data.len() as u64,
        });
    }

    let dict = render_dict(arr);
    let unpadded = dict.len() + 1; // the terminating newline

    let mut header_len = padded_header_len(unpadded, 2);
    let v2 = header_len > u16::MAX as usize;
    if v2 {
        header_len = padded_header_len(unpadded, 4);
    }
    trace!(
        "npy header: {} dict bytes, {} padded, version {}",
        dict.len(),
        header_len,
        if v2 { 2 } else { 1 }
    );

    writer.write_all(&MAGIC)?;
    writer.write_u8(if v2 { 2 } else { 1 })?;
    writer.write_u8(0)?;
    if v2 {
        writer.write_u32::<LittleEndian>(header_len as u32)?;
    } else {
        writer.write_u16::<LittleEndian>(header_len as u16)?;
    }

    writer.write_all(dict.as_bytes())?;
    let padding = vec![b' '; header_len - unpadded];
    writer.write_all(&padding)?;
    writer.write_u8(b'\n')?;

    writer.write_all(&arr.data[..payload_len as usize])?;
    writer.flush()?;

    debug!(
        "wrote npy array: descr='{}', shape={:?}, {} payload bytes",
        arr.descr, arr.shape, payload_len
    );
    Ok(())
}
