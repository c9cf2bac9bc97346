//! Transaction construction via the builder pattern.
//!
//! [`TxBuilder`] takes fields in their human form (display hex, addresses,
//! coin amounts) and produces an unsigned [`RawTransaction`]. Setters never
//! fail; the first problems are latched and reported together by
//! [`TxBuilder::build`], so a chain of setters reads top to bottom without
//! a `?` on every line.
//!
//! The builder does not sign. That happens in [`super::signing`].

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::payload::VchData;
use super::types::{RawTransaction, TxInput};
use crate::address::Destination;
use crate::config::{DEFAULT_TX_TYPE, DEFAULT_TX_VERSION, PRECISION, PRECISION_DECIMALS};
use crate::encoding::Uint256;
use crate::error::CodecError;

/// Converts a coin amount to fixed-point units, truncating past the sixth
/// decimal.
///
/// The value is taken from its shortest decimal rendering, so `1.23` becomes
/// `1_230_000` rather than whatever `1.23 * 1e6` rounds to in binary.
pub fn coins_to_units(field: &'static str, coins: f64) -> Result<i64, CodecError> {
    let invalid = |reason: String| CodecError::InvalidAmount { field, reason };
    if !coins.is_finite() {
        return Err(invalid(format!("{coins} is not a finite number")));
    }
    if coins < 0.0 {
        return Err(invalid(format!("{coins} is negative")));
    }

    let rendered = coins.to_string();
    let (whole, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let whole: i64 = whole
        .parse()
        .map_err(|_| invalid(format!("{coins} is out of range")))?;

    let mut frac_units = 0i64;
    for position in 0..PRECISION_DECIMALS {
        let digit = frac
            .as_bytes()
            .get(position)
            .map_or(0, |b| i64::from(b - b'0'));
        frac_units = frac_units * 10 + digit;
    }

    whole
        .checked_mul(PRECISION)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or_else(|| invalid(format!("{coins} is out of range")))
}

// ---------------------------------------------------------------------------
// TxBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`RawTransaction`] values.
///
/// ```
/// use bbc_protocol::transaction::TxBuilder;
///
/// let tx = TxBuilder::new()
///     .timestamp(1_590_474_715)
///     .input("5ec5e3989f7c93addc642d0a3fb6cd911b22a3017ebd971894327080aea2e782", 1)
///     .address("1fhtnq5n1b9bte99x5fw0m7cw9jm4n6kgv9nbeynscsgzryvhjf7ny9tm")
///     .amount(1.23)
///     .fee(0.01)
///     .build()
///     .unwrap();
/// assert_eq!(tx.amount, 1_230_000);
/// assert!(!tx.is_signed());
/// ```
///
/// Defaults: version 1, type 0 (token transfer), timestamp set to the
/// current time when the builder is created, zero anchor, zero lock height.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    tx: RawTransaction,
    amount: Option<i64>,
    fee: Option<i64>,
    errors: Vec<CodecError>,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    pub fn new() -> Self {
        let now = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        Self {
            tx: RawTransaction {
                version: DEFAULT_TX_VERSION,
                tx_type: DEFAULT_TX_TYPE,
                timestamp: now,
                ..RawTransaction::default()
            },
            amount: None,
            fee: None,
            errors: Vec::new(),
        }
    }

    fn latch(&mut self, err: CodecError) {
        debug!(error = %err, "transaction builder rejected a field");
        self.errors.push(err);
    }

    /// Fork id as display hex. Ignored by the without-anchor profile.
    pub fn anchor(mut self, anchor_hex: &str) -> Self {
        match Uint256::from_display_hex("anchor", anchor_hex) {
            Ok(anchor) => self.tx.anchor = anchor,
            Err(e) => self.latch(e),
        }
        self
    }

    pub fn timestamp(mut self, timestamp: u32) -> Self {
        self.tx.timestamp = timestamp;
        self
    }

    pub fn lock_until(mut self, lock_until: u32) -> Self {
        self.tx.lock_until = lock_until;
        self
    }

    pub fn version(mut self, version: u16) -> Self {
        self.tx.version = version;
        self
    }

    pub fn tx_type(mut self, tx_type: u16) -> Self {
        self.tx.tx_type = tx_type;
        self
    }

    /// Spends output `vout` of `txid` (display hex, as `listunspent` prints it).
    pub fn input(mut self, txid: &str, vout: u8) -> Self {
        match TxInput::from_txid_hex(txid, vout) {
            Ok(input) => self.tx.inputs.push(input),
            Err(e) => self.latch(e),
        }
        self
    }

    /// Recipient address, `1...` or `2...`.
    pub fn address(mut self, address: &str) -> Self {
        match Destination::from_address(address) {
            Ok(destination) if destination.is_null() => {
                self.latch(CodecError::UnknownAddressPrefix {
                    prefix: destination.kind.prefix_char(),
                });
            }
            Ok(destination) => self.tx.destination = destination,
            Err(e) => self.latch(e),
        }
        self
    }

    /// Amount in coins.
    pub fn amount(mut self, coins: f64) -> Self {
        match coins_to_units("amount", coins) {
            Ok(units) => self.amount = Some(units),
            Err(e) => self.latch(e),
        }
        self
    }

    /// Amount in fixed-point units.
    pub fn amount_units(mut self, units: i64) -> Self {
        if units < 0 {
            self.latch(CodecError::InvalidAmount {
                field: "amount",
                reason: format!("{units} is negative"),
            });
        } else {
            self.amount = Some(units);
        }
        self
    }

    /// Fee in coins.
    pub fn fee(mut self, coins: f64) -> Self {
        match coins_to_units("fee", coins) {
            Ok(units) => self.fee = Some(units),
            Err(e) => self.latch(e),
        }
        self
    }

    /// Fee in fixed-point units.
    pub fn fee_units(mut self, units: i64) -> Self {
        if units < 0 {
            self.latch(CodecError::InvalidAmount {
                field: "fee",
                reason: format!("{units} is negative"),
            });
        } else {
            self.fee = Some(units);
        }
        self
    }

    /// Payload bytes as given, without a vchData header.
    pub fn raw_data(mut self, data: Vec<u8>) -> Self {
        self.tx.payload = data;
        self
    }

    /// Wraps `data` in a vchData header with a fresh uuid and the current
    /// time. An empty `format` leaves the data untyped.
    pub fn data(mut self, format: &str, data: Vec<u8>) -> Self {
        match VchData::new(format, data) {
            Ok(vch) => self.tx.payload = vch.to_bytes(),
            Err(e) => self.latch(e),
        }
        self
    }

    /// Wraps `data` in a vchData header with a caller-chosen uuid and time.
    pub fn data_with(mut self, uuid: &str, unix_time: i64, format: &str, data: Vec<u8>) -> Self {
        let uuid = match Uuid::parse_str(uuid) {
            Ok(uuid) => uuid,
            Err(e) => {
                self.latch(CodecError::Encoding {
                    field: "uuid",
                    reason: e.to_string(),
                });
                return self;
            }
        };
        match VchData::with(uuid, unix_time, format, data) {
            Ok(vch) => self.tx.payload = vch.to_bytes(),
            Err(e) => self.latch(e),
        }
        self
    }

    /// Returns the unsigned transaction, or every problem found.
    pub fn build(self) -> Result<RawTransaction, CodecError> {
        let Self {
            mut tx,
            amount,
            fee,
            mut errors,
        } = self;

        if tx.inputs.is_empty() {
            errors.push(CodecError::Encoding {
                field: "inputs",
                reason: "no input provided".into(),
            });
        }
        match amount {
            Some(units) => tx.amount = units,
            None => errors.push(CodecError::InvalidAmount {
                field: "amount",
                reason: "not set".into(),
            }),
        }
        match fee {
            Some(units) => tx.fee = units,
            None => errors.push(CodecError::InvalidAmount {
                field: "fee",
                reason: "not set".into(),
            }),
        }

        if errors.is_empty() {
            Ok(tx)
        } else {
            Err(CodecError::IncompleteTransaction { errors })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
