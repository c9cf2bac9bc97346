//! 32-byte values in wire orientation.
//!
//! The ledger stores hashes and keys byte-reversed relative to the hex
//! strings people read. `Uint256` always holds the wire bytes; converting
//! to or from the display string is the only place bytes get reversed.

use std::fmt;

use crate::error::CodecError;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uint256([u8; 32]);

impl Uint256 {
    pub const ZERO: Uint256 = Uint256([0u8; 32]);

    pub const fn from_wire_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds from bytes in display orientation (as printed in hex).
    pub fn from_display_bytes(bytes: [u8; 32]) -> Self {
        let mut wire = bytes;
        wire.reverse();
        Self(wire)
    }

    /// Parses a 64-character display hex string.
    pub fn from_display_hex(field: &'static str, s: &str) -> Result<Self, CodecError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| CodecError::hex(field, e))?;
        Ok(Self::from_display_bytes(bytes))
    }

    /// Copies a 32-byte wire slice; any other length is an encoding error.
    pub fn from_wire_slice(field: &'static str, bytes: &[u8]) -> Result<Self, CodecError> {
        let wire: [u8; 32] = bytes.try_into().map_err(|_| CodecError::Encoding {
            field,
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        })?;
        Ok(Self(wire))
    }

    pub fn as_wire_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_display_bytes(&self) -> [u8; 32] {
        let mut display = self.0;
        display.reverse();
        display
    }

    pub fn to_display_hex(&self) -> String {
        hex::encode(self.to_display_bytes())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_hex())
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint256({})", self.to_display_hex())
    }
}

impl From<[u8; 32]> for Uint256 {
    fn from(wire: [u8; 32]) -> Self {
        Self(wire)
    }
}
