//! # Addresses
//!
//! An address is a prefix digit followed by 56 radix-32 symbols:
//!
//! ```text
//! '1' + base32(pubkey_wire[32] ++ crc24q[3])       public-key destination
//! '2' + base32(template_id_wire[32] ++ crc24q[3])  template destination
//! ```
//!
//! Inside a transaction the same destination is stored as one prefix byte
//! (1 or 2) followed by the 32 wire bytes. [`Destination`] is that pair;
//! this module converts it to and from the printable form.
//!
//! Public-key addresses are validated by re-derivation: the decoded key is
//! encoded again and must reproduce the input, which catches any flipped
//! symbol through the checksum. Template addresses are decoded as-is; the
//! caller checks them against the template data it holds.

pub mod base32;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ADDRESS_LENGTH, ADDRESS_PREFIX_PUBKEY, ADDRESS_PREFIX_TEMPLATE};
use crate::encoding::Uint256;
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// DestinationKind
// ---------------------------------------------------------------------------

/// What the 32 destination bytes identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    /// No destination. Only seen in records nobody filled in.
    #[default]
    Null,
    /// A raw ed25519 public key.
    PublicKey,
    /// The id of a spending template.
    Template,
}

impl DestinationKind {
    /// Wire prefix byte.
    pub fn prefix(self) -> u8 {
        match self {
            DestinationKind::Null => 0,
            DestinationKind::PublicKey => 1,
            DestinationKind::Template => 2,
        }
    }

    pub fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0 => Some(DestinationKind::Null),
            1 => Some(DestinationKind::PublicKey),
            2 => Some(DestinationKind::Template),
            _ => None,
        }
    }

    /// Leading character of the printable address.
    pub fn prefix_char(self) -> char {
        match self {
            DestinationKind::Null => '0',
            DestinationKind::PublicKey => ADDRESS_PREFIX_PUBKEY,
            DestinationKind::Template => ADDRESS_PREFIX_TEMPLATE,
        }
    }

    fn from_prefix_char(c: char) -> Result<Self, CodecError> {
        match c {
            '0' => Ok(DestinationKind::Null),
            ADDRESS_PREFIX_PUBKEY => Ok(DestinationKind::PublicKey),
            ADDRESS_PREFIX_TEMPLATE => Ok(DestinationKind::Template),
            prefix => Err(CodecError::UnknownAddressPrefix { prefix }),
        }
    }
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// A transaction recipient: kind plus 32 bytes in wire orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Destination {
    pub kind: DestinationKind,
    pub value: Uint256,
}

impl Destination {
    pub fn new(kind: DestinationKind, value: Uint256) -> Self {
        Self { kind, value }
    }

    pub fn public_key(key: Uint256) -> Self {
        Self::new(DestinationKind::PublicKey, key)
    }

    pub fn template(id: Uint256) -> Self {
        Self::new(DestinationKind::Template, id)
    }

    pub fn is_null(&self) -> bool {
        self.kind == DestinationKind::Null
    }

    pub fn to_address(&self) -> String {
        encode(self.kind, &self.value)
    }

    pub fn from_address(address: &str) -> Result<Self, CodecError> {
        let (kind, value) = decode(address)?;
        Ok(Self::new(kind, value))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl FromStr for Destination {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::from_address(s)
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Prints `value` as an address of the given kind.
pub fn encode(kind: DestinationKind, value: &Uint256) -> String {
    let mut address = String::with_capacity(ADDRESS_LENGTH);
    address.push(kind.prefix_char());
    address.push_str(&base32::encode(value.as_wire_bytes()));
    address
}

/// Parses an address into its kind and 32-byte value.
///
/// Fails with [`CodecError::UnknownAddressPrefix`] for a foreign leading
/// digit, [`CodecError::Encoding`] for a malformed body and
/// [`CodecError::AddressChecksumMismatch`] when a public-key address does
/// not survive re-encoding.
pub fn decode(address: &str) -> Result<(DestinationKind, Uint256), CodecError> {
    let mut chars = address.chars();
    let prefix = chars.next().ok_or_else(|| CodecError::Encoding {
        field: "address",
        reason: "empty address".into(),
    })?;
    let kind = DestinationKind::from_prefix_char(prefix)?;
    let body = base32::decode(chars.as_str())?;
    let value = Uint256::from_wire_bytes(body.payload);

    if kind == DestinationKind::PublicKey && encode(kind, &value) != address.to_ascii_lowercase() {
        return Err(CodecError::AddressChecksumMismatch {
            address: address.to_string(),
        });
    }
    Ok((kind, value))
}

/// Recovers the public key behind a `1...` address as display hex.
///
/// The three checksum bytes carried by the address are dropped; only the
/// 32-byte key is returned.
pub fn address_to_public_key_hex(address: &str) -> Result<String, CodecError> {
    match decode(address)? {
        (DestinationKind::PublicKey, key) => Ok(key.to_display_hex()),
        (kind, _) => Err(CodecError::InvalidKeyMaterial {
            field: "address",
            reason: format!("{kind:?} address does not carry a public key"),
        }),
    }
}
