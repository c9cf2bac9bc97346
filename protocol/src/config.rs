//! # Protocol Configuration & Constants
//!
//! Every magic number of the wire format lives here. If you're hardcoding a
//! field width somewhere else, you're doing it wrong.
//!
//! These values are fixed by the ledger's reference node. Changing any of
//! them produces bytes the network will not accept, so treat this file as
//! read-only unless the upstream format changes.
//!
//! The second half of the file holds [`CodecConfig`], the only runtime knob
//! of the library. It is a plain value handed to a
//! [`Serializer`](crate::transaction::Serializer) at construction time;
//! there is no process-wide switch that changes behavior mid-operation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Fixed-point scale of `amount` and `fee`: one coin is 10^6 units.
pub const PRECISION: i64 = 1_000_000;

/// Number of decimal places represented by [`PRECISION`].
pub const PRECISION_DECIMALS: usize = 6;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 seed (private key) length in bytes.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Every multisig share is exactly this long.
pub const SIGNATURE_LENGTH: usize = 64;

/// Output length of the blake2b variant used for signing hashes, transaction
/// ids and template ids.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// Width of one serialized input: 32-byte previous txid + 1-byte output index.
pub const INPUT_RECORD_LENGTH: usize = 33;

/// Width of the anchor (fork id) field in the with-anchor profile.
pub const ANCHOR_LENGTH: usize = 32;

/// Fixed-width part of a with-anchor transaction when every size field fits
/// in one byte: header (12) + anchor + input count (1) + destination (33) +
/// amount and fee (16) + payload and signature sizes (2).
pub const TX_FIXED_LENGTH: usize = 12 + ANCHOR_LENGTH + 1 + 33 + 16 + 2;

/// Default transaction version written by the builder.
pub const DEFAULT_TX_VERSION: u16 = 1;

/// Default transaction type written by the builder (plain token transfer).
pub const DEFAULT_TX_TYPE: u16 = 0;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Leading character of a public-key address.
pub const ADDRESS_PREFIX_PUBKEY: char = '1';

/// Leading character of a template address.
pub const ADDRESS_PREFIX_TEMPLATE: char = '2';

/// Bytes of CRC-24Q checksum appended to the 32-byte value before radix-32
/// encoding.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 3;

/// Length of the radix-32 body: (32 + 3) bytes * 8 bits / 5 bits.
pub const ADDRESS_BODY_LENGTH: usize = 56;

/// Full address length including the prefix digit.
pub const ADDRESS_LENGTH: usize = ADDRESS_BODY_LENGTH + 1;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Separator between template hex strings supplied to the signer.
pub const TEMPLATE_DATA_SEPARATOR: char = ',';

/// Width of the little-endian type tag at the front of every template.
pub const TEMPLATE_TYPE_LENGTH: usize = 2;

/// Number of blake2b bytes kept in a template id (the type tag fills the rest).
pub const TEMPLATE_HASH_PREFIX_LENGTH: usize = HASH_LENGTH - TEMPLATE_TYPE_LENGTH;

/// Prefix of the `enc;<templates>;<tx>` hand-off envelope.
pub const TX_DATA_ENVELOPE_PREFIX: &str = "enc";

// ---------------------------------------------------------------------------
// Payload (vchData)
// ---------------------------------------------------------------------------

/// Width of the uuid at the front of a vchData payload.
pub const VCH_DATA_UUID_LENGTH: usize = 16;

/// Width of the little-endian unix time after the uuid.
pub const VCH_DATA_TIME_LENGTH: usize = 4;

/// Minimum vchData length: uuid + time + format-description size (1).
pub const VCH_DATA_MIN_LENGTH: usize = VCH_DATA_UUID_LENGTH + VCH_DATA_TIME_LENGTH + 1;

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Serialization profile. The profile is not self-describing in the bytes;
/// whoever hands over a transaction hex must also say which chain it is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Main chain format: a 32-byte anchor follows `lock_until`.
    #[default]
    #[serde(alias = "bbc")]
    WithAnchor,
    /// Side-chain format without the anchor field.
    #[serde(alias = "mkf")]
    WithoutAnchor,
}

impl Profile {
    /// Whether the 32-byte anchor is part of the wire layout.
    pub fn includes_anchor(self) -> bool {
        matches!(self, Profile::WithAnchor)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::WithAnchor => write!(f, "with-anchor"),
            Profile::WithoutAnchor => write!(f, "without-anchor"),
        }
    }
}

/// How a parse reacts to the first failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Stop at the first failing field.
    FailFast,
    /// Keep reading and report every failing field in one pass.
    #[default]
    CollectAll,
}

/// Diagnostic output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Emit a `debug!` event for every field that fails to decode.
    pub log_field_errors: bool,
}

/// Configuration captured by a [`Serializer`](crate::transaction::Serializer).
///
/// ```
/// use bbc_protocol::config::{CodecConfig, DecodeMode, Profile};
///
/// let config = CodecConfig::from_json(r#"{"profile":"mkf","decode_mode":"fail_fast"}"#).unwrap();
/// assert_eq!(config.profile, Profile::WithoutAnchor);
/// assert_eq!(config.decode_mode, DecodeMode::FailFast);
/// assert!(!config.diagnostics.log_field_errors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub profile: Profile,
    pub decode_mode: DecodeMode,
    pub diagnostics: Diagnostics,
}

impl CodecConfig {
    /// Default settings for the given profile.
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Parse a configuration document. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(|e| CodecError::Encoding {
            field: "config",
            reason: e.to_string(),
        })
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    pub fn with_field_logging(mut self, enabled: bool) -> Self {
        self.diagnostics.log_field_errors = enabled;
        self
    }
}
