//! The raw transaction record, field for field as it travels on the wire.

use crate::address::Destination;
use crate::config::PRECISION;
use crate::encoding::Uint256;
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// TxInput
// ---------------------------------------------------------------------------

/// A spent output: previous transaction id plus output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxInput {
    /// Previous txid, wire orientation.
    pub prev_txid: Uint256,
    pub vout: u8,
}

impl TxInput {
    pub fn new(prev_txid: Uint256, vout: u8) -> Self {
        Self { prev_txid, vout }
    }

    /// From the txid as printed by the node.
    pub fn from_txid_hex(txid: &str, vout: u8) -> Result<Self, CodecError> {
        Ok(Self::new(Uint256::from_display_hex("txid", txid)?, vout))
    }

    pub fn txid_hex(&self) -> String {
        self.prev_txid.to_display_hex()
    }
}

// ---------------------------------------------------------------------------
// RawTransaction
// ---------------------------------------------------------------------------

/// A transaction exactly as serialized.
///
/// Counts (`inputs`, `payload`, `signature` lengths) are not stored; they
/// are derived from the vectors when writing, so they cannot disagree with
/// the data.
///
/// `amount` and `fee` are fixed-point with six decimals
/// ([`PRECISION`] units per coin).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTransaction {
    pub version: u16,
    pub tx_type: u16,
    /// Unix seconds.
    pub timestamp: u32,
    pub lock_until: u32,
    /// Fork id. Only written by the with-anchor profile.
    pub anchor: Uint256,
    pub inputs: Vec<TxInput>,
    pub destination: Destination,
    pub amount: i64,
    pub fee: i64,
    /// Opaque application data, commonly a [`VchData`](super::payload::VchData).
    pub payload: Vec<u8>,
    /// Template bodies followed by signature bytes.
    pub signature: Vec<u8>,
}

impl RawTransaction {
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// A copy with the signature field emptied.
    pub fn without_signature(&self) -> Self {
        Self {
            signature: Vec::new(),
            ..self.clone()
        }
    }

    pub fn amount_coins(&self) -> f64 {
        self.amount as f64 / PRECISION as f64
    }

    pub fn fee_coins(&self) -> f64 {
        self.fee as f64 / PRECISION as f64
    }
}
