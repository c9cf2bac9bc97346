//! Variable-length size prefix.
//!
//! ```text
//! value < 0xFD          -> [value]
//! value <= 0xFFFF       -> [0xFD][u16 LE]
//! value <= 0xFFFF_FFFF  -> [0xFE][u32 LE]
//! otherwise             -> [0xFF][u64 LE]
//! ```
//!
//! Decoding accepts non-minimal encodings: the reference node does, and a
//! stricter reader would reject transactions the network considers valid.

use super::stream::Decoder;
use crate::error::CodecError;

pub const MARKER_U16: u8 = 0xfd;
pub const MARKER_U32: u8 = 0xfe;
pub const MARKER_U64: u8 = 0xff;

/// Number of bytes `value` occupies once encoded.
pub fn encoded_size_len(value: u64) -> usize {
    match value {
        v if v < MARKER_U16 as u64 => 1,
        v if v <= 0xffff => 3,
        v if v <= 0xffff_ffff => 5,
        _ => 9,
    }
}

/// Appends the encoding of `value` to `buf`.
pub fn write_size(buf: &mut Vec<u8>, value: u64) {
    if value < MARKER_U16 as u64 {
        buf.push(value as u8);
    } else if value <= 0xffff {
        buf.push(MARKER_U16);
        buf.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        buf.push(MARKER_U32);
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        buf.push(MARKER_U64);
        buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// Encodes `value` into a fresh buffer.
pub fn encode_size(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_size_len(value));
    write_size(&mut buf, value);
    buf
}

/// Decodes a size prefix from the front of `input`.
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`CodecError::TruncatedInput`] when the marker promises more bytes than
/// `input` holds.
pub fn decode_size(input: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.read_size("size")?;
    Ok((value, decoder.position()))
}
