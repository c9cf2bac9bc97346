//! Radix-32 body of an address: 32 payload bytes plus a CRC-24Q checksum,
//! packed most-significant bit first into 56 symbols.

use crate::config::{ADDRESS_BODY_LENGTH, ADDRESS_CHECKSUM_LENGTH};
use crate::error::CodecError;

/// Symbol set. No `i`, `l`, `o` or `u`.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const CRC24Q_POLY: u32 = 0x0186_4cfb;

const BODY_BYTES: usize = 32 + ADDRESS_CHECKSUM_LENGTH;

/// CRC-24Q (init 0, no reflection, no final xor).
pub fn crc24q(data: &[u8]) -> u32 {
    let mut crc: u32 = 0;
    for &byte in data {
        crc ^= (byte as u32) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & 0x0100_0000 != 0 {
                crc ^= CRC24Q_POLY;
            }
        }
    }
    crc & 0x00ff_ffff
}

fn symbol_value(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    ALPHABET
        .iter()
        .position(|&s| s as char == c)
        .map(|v| v as u8)
}

/// Encodes a 32-byte payload (wire orientation) with its checksum.
pub fn encode(payload: &[u8; 32]) -> String {
    let crc = crc24q(payload).to_be_bytes();
    let mut out = String::with_capacity(ADDRESS_BODY_LENGTH);
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for &byte in payload.iter().chain(&crc[1..]) {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
        acc &= (1 << bits) - 1;
    }
    out
}

/// Decoded body: the payload and the checksum that travelled with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub payload: [u8; 32],
    pub checksum: [u8; ADDRESS_CHECKSUM_LENGTH],
}

impl Body {
    pub fn checksum_matches(&self) -> bool {
        crc24q(&self.payload).to_be_bytes()[1..] == self.checksum
    }
}

/// Decodes 56 symbols. Case-insensitive; the checksum is returned, not
/// checked.
pub fn decode(body: &str) -> Result<Body, CodecError> {
    let len = body.chars().count();
    if len != ADDRESS_BODY_LENGTH {
        return Err(CodecError::Encoding {
            field: "address",
            reason: format!("expected {ADDRESS_BODY_LENGTH} symbols, got {len}"),
        });
    }

    let mut bytes = [0u8; BODY_BYTES];
    let mut filled = 0;
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for c in body.chars() {
        let value = symbol_value(c).ok_or_else(|| CodecError::Encoding {
            field: "address",
            reason: format!("invalid radix-32 character {c:?}"),
        })?;
        acc = (acc << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            bytes[filled] = (acc >> bits) as u8;
            filled += 1;
        }
        acc &= (1 << bits) - 1;
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&bytes[..32]);
    let mut checksum = [0u8; ADDRESS_CHECKSUM_LENGTH];
    checksum.copy_from_slice(&bytes[32..]);
    Ok(Body { payload, checksum })
}
