//! Byte-level writer and reader for the wire format.
//!
//! The [`Decoder`] names the field on every read, so a failure always says
//! which field ran out. A failed read drains the buffer: once one field is
//! short, every later field sees zero remaining bytes, which is what a
//! collect-all parse reports.

use super::size::{self, MARKER_U16, MARKER_U32, MARKER_U64};
use crate::error::{FieldError, FieldFailure};

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64_le(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_size(&mut self, value: u64) {
        size::write_size(&mut self.buf, value);
    }

    /// Size prefix followed by the bytes themselves.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_size(bytes.len() as u64);
        self.write_bytes(bytes);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

pub struct Decoder<'a> {
    input: &'a [u8],
    cursor: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.cursor)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.cursor.min(self.input.len())..]
    }

    fn drain(&mut self) {
        self.cursor = self.input.len();
    }

    fn read_slice(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], FieldError> {
        let remaining = self.remaining();
        if remaining < len {
            self.drain();
            return Err(FieldError::truncated(field, len, remaining));
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.input[start..start + len])
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, FieldError> {
        Ok(self.read_slice(field, 1)?[0])
    }

    pub fn read_u16_le(&mut self, field: &'static str) -> Result<u16, FieldError> {
        Ok(u16::from_le_bytes(self.read_fixed(field)?))
    }

    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32, FieldError> {
        Ok(u32::from_le_bytes(self.read_fixed(field)?))
    }

    pub fn read_u64_le(&mut self, field: &'static str) -> Result<u64, FieldError> {
        Ok(u64::from_le_bytes(self.read_fixed(field)?))
    }

    pub fn read_i64_le(&mut self, field: &'static str) -> Result<i64, FieldError> {
        Ok(i64::from_le_bytes(self.read_fixed(field)?))
    }

    pub fn read_fixed<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], FieldError> {
        let bytes = self.read_slice(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<Vec<u8>, FieldError> {
        Ok(self.read_slice(field, len)?.to_vec())
    }

    /// Reads a size prefix. Non-minimal encodings are accepted.
    pub fn read_size(&mut self, field: &'static str) -> Result<u64, FieldError> {
        let marker = self.read_u8(field)?;
        match marker {
            MARKER_U16 => Ok(self.read_u16_le(field)? as u64),
            MARKER_U32 => Ok(self.read_u32_le(field)? as u64),
            MARKER_U64 => self.read_u64_le(field),
            literal => Ok(literal as u64),
        }
    }

    /// Reads a size prefix counting items of `unit` bytes each and checks
    /// that many items actually follow, before anything is allocated.
    pub fn read_count(&mut self, field: &'static str, unit: usize) -> Result<usize, FieldError> {
        let declared = self.read_size(field)?;
        let remaining = self.remaining();
        let fits = usize::try_from(declared)
            .ok()
            .and_then(|count| count.checked_mul(unit).map(|len| (count, len)))
            .filter(|(_, len)| *len <= remaining);
        match fits {
            Some((count, _)) => Ok(count),
            None => {
                self.drain();
                Err(FieldError {
                    field,
                    failure: FieldFailure::SizeOverflow {
                        declared,
                        remaining,
                    },
                })
            }
        }
    }

    /// Size prefix followed by that many bytes.
    pub fn read_var_bytes(&mut self, field: &'static str) -> Result<Vec<u8>, FieldError> {
        let len = self.read_count(field, 1)?;
        self.read_bytes(field, len)
    }
}
