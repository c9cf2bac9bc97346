//! Error types shared by every codec and signing operation.
//!
//! Nothing in this crate performs I/O, so nothing here is retried: every
//! failure is a property of the input and is returned to the caller with
//! the offending field named.
//!
//! Field-level read failures are collected in [`Decoded`], which carries a
//! best-effort partial value next to the list of failing fields. Callers pick
//! fail-fast or collect-all through [`DecodeMode`](crate::config::DecodeMode).

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Field-level failures
// ---------------------------------------------------------------------------

/// Why a single field could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFailure {
    /// Fewer bytes remain than the field requires.
    Truncated { needed: usize, remaining: usize },
    /// A declared length cannot fit in the remaining buffer (or in `usize`).
    SizeOverflow { declared: u64, remaining: usize },
    /// The destination prefix byte is none of the known kinds.
    UnknownPrefix(u8),
    /// An earlier size field failed, so this field's extent is unknown.
    Skipped,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFailure::Truncated { needed, remaining } => {
                write!(f, "needs {needed} bytes, {remaining} remaining")
            }
            FieldFailure::SizeOverflow {
                declared,
                remaining,
            } => write!(f, "declared size {declared} exceeds {remaining} remaining bytes"),
            FieldFailure::UnknownPrefix(prefix) => write!(f, "unknown destination prefix {prefix}"),
            FieldFailure::Skipped => write!(f, "skipped after earlier size failure"),
        }
    }
}

/// A read failure attributed to a named wire field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {failure}")]
pub struct FieldError {
    pub field: &'static str,
    pub failure: FieldFailure,
}

impl FieldError {
    pub fn truncated(field: &'static str, needed: usize, remaining: usize) -> Self {
        Self {
            field,
            failure: FieldFailure::Truncated { needed, remaining },
        }
    }

    /// Converts a standalone field failure into the caller-facing error kind.
    pub fn into_codec_error(self) -> CodecError {
        match self.failure {
            FieldFailure::Truncated { needed, remaining } => CodecError::TruncatedInput {
                field: self.field,
                needed,
                remaining,
            },
            _ => CodecError::MalformedTransaction { errors: vec![self] },
        }
    }
}

// ---------------------------------------------------------------------------
// CodecError
// ---------------------------------------------------------------------------

/// Every way a codec or signing operation can fail.
///
/// Variants are the failure *kinds* callers branch on; the payloads say
/// which field or input caused them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Hex, radix-32 or another textual encoding is malformed.
    #[error("{field}: encoding error: {reason}")]
    Encoding { field: &'static str, reason: String },

    /// A single field needs more bytes than remain.
    #[error("{field}: truncated input (needs {needed} bytes, {remaining} remaining)")]
    TruncatedInput {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A transaction buffer ran out (or lied about a size) in one or more fields.
    #[error("malformed transaction: {}", join(.errors))]
    MalformedTransaction { errors: Vec<FieldError> },

    /// Re-encoding the decoded public key did not reproduce the address.
    #[error("address checksum mismatch for {address}")]
    AddressChecksumMismatch { address: String },

    /// The address starts with neither `1` nor `2`.
    #[error("unknown address prefix {prefix:?}")]
    UnknownAddressPrefix { prefix: char },

    /// A template is too short for its declared member count, or has an
    /// unexpected type tag.
    #[error("invalid template encoding: {reason}")]
    InvalidTemplateEncoding { reason: String },

    /// Resumed partial signature was produced for different template bytes.
    #[error("existing signature does not start with the supplied template data")]
    TemplateMismatch,

    /// A single-key spend already carries signature bytes.
    #[error("transaction already signed")]
    AlreadySigned,

    /// A key or seed has the wrong length or is not a valid point.
    #[error("{field}: invalid key material: {reason}")]
    InvalidKeyMaterial { field: &'static str, reason: String },

    /// The signing key is not a member of the multisig template.
    #[error("signer {public_key} is not a member of the multisig template")]
    SignerNotInTemplate { public_key: String },

    /// The partial-signature aggregate is structurally inconsistent.
    #[error("invalid partial signature: {reason}")]
    InvalidPartialSignature { reason: String },

    /// The payload does not follow the vchData layout.
    #[error("invalid vchData: {reason}")]
    InvalidVchData { reason: String },

    /// An amount or fee is negative or not representable.
    #[error("{field}: invalid amount: {reason}")]
    InvalidAmount { field: &'static str, reason: String },

    /// The builder's deferred checks failed; every problem is listed.
    #[error("cannot build transaction: {}", join(.errors))]
    IncompleteTransaction { errors: Vec<CodecError> },
}

impl CodecError {
    pub(crate) fn hex(field: &'static str, err: hex::FromHexError) -> Self {
        CodecError::Encoding {
            field,
            reason: err.to_string(),
        }
    }
}

impl From<FieldError> for CodecError {
    fn from(err: FieldError) -> Self {
        err.into_codec_error()
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Decoded<T>
// ---------------------------------------------------------------------------

/// A best-effort parse result: the value read so far plus every field that
/// failed. Fields that failed hold their default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub value: T,
    pub errors: Vec<FieldError>,
}

impl<T> Decoded<T> {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with [`CodecError::MalformedTransaction`] if any field failed.
    pub fn into_result(self) -> Result<T, CodecError> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(CodecError::MalformedTransaction {
                errors: self.errors,
            })
        }
    }
}
