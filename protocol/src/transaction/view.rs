//! Display-oriented views of a transaction and the `enc;tpl;tx` envelope
//! used to pass an unsigned transaction between co-signers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{TEMPLATE_DATA_SEPARATOR, TX_DATA_ENVELOPE_PREFIX};
use crate::error::CodecError;
use crate::template::TemplateType;

use super::serializer::Serializer;
use super::types::RawTransaction;

// ---------------------------------------------------------------------------
// TransactionView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputView {
    pub txid: String,
    pub vout: u8,
}

/// A decoded transaction with every hash, key and byte field rendered the
/// way the node prints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    pub version: u16,
    #[serde(rename = "type")]
    pub tx_type: u16,
    pub timestamp: u32,
    pub lock_until: u32,
    pub anchor: String,
    pub inputs: Vec<InputView>,
    pub address: String,
    pub amount: i64,
    pub fee: i64,
    pub data: String,
    /// Empty when the view was taken without the signature.
    pub sign: String,
}

impl TransactionView {
    pub fn new(tx: &RawTransaction, include_signature: bool) -> Self {
        Self {
            version: tx.version,
            tx_type: tx.tx_type,
            timestamp: tx.timestamp,
            lock_until: tx.lock_until,
            anchor: tx.anchor.to_display_hex(),
            inputs: tx
                .inputs
                .iter()
                .map(|input| InputView {
                    txid: input.txid_hex(),
                    vout: input.vout,
                })
                .collect(),
            address: tx.destination.to_address(),
            amount: tx.amount,
            fee: tx.fee,
            data: hex::encode(&tx.payload),
            sign: if include_signature {
                hex::encode(&tx.signature)
            } else {
                String::new()
            },
        }
    }
}

impl Serializer {
    /// Decodes transaction hex into a record and its view. Without
    /// `include_signature` the returned record has its signature cleared.
    pub fn decode_view(
        &self,
        tx_hex: &str,
        include_signature: bool,
    ) -> Result<(RawTransaction, TransactionView), CodecError> {
        let mut tx = self.deserialize_hex(tx_hex)?;
        if !include_signature {
            tx.signature.clear();
        }
        let view = TransactionView::new(&tx, include_signature);
        Ok((tx, view))
    }
}

// ---------------------------------------------------------------------------
// TxData envelope
// ---------------------------------------------------------------------------

/// Unsigned transaction hex plus the template list needed to sign it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tpl_hex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tx_hex: String,
}

impl TxData {
    pub fn new(tpl_hex: impl Into<String>, tx_hex: impl Into<String>) -> Self {
        Self {
            tpl_hex: tpl_hex.into(),
            tx_hex: tx_hex.into(),
        }
    }

    /// Whether any listed template carries the multisig type tag.
    pub fn contains_multisig(&self) -> bool {
        let tag = hex::encode(TemplateType::Multisig.tag().to_le_bytes());
        self.tpl_hex
            .split(TEMPLATE_DATA_SEPARATOR)
            .filter(|entry| !entry.is_empty())
            .any(|entry| entry.get(..4).is_some_and(|t| t.eq_ignore_ascii_case(&tag)))
    }
}

impl fmt::Display for TxData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TX_DATA_ENVELOPE_PREFIX};{};{}", self.tpl_hex, self.tx_hex)
    }
}

impl FromStr for TxData {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CodecError::Encoding {
            field: "tx_data",
            reason: reason.to_string(),
        };
        let parts: Vec<&str> = s.split(';').collect();
        match parts.as_slice() {
            [prefix, tpl_hex, tx_hex] if *prefix == TX_DATA_ENVELOPE_PREFIX => {
                Ok(Self::new(*tpl_hex, *tx_hex))
            }
            [prefix, ..] if *prefix != TX_DATA_ENVELOPE_PREFIX => {
                Err(invalid("missing enc prefix"))
            }
            _ => Err(invalid("expected enc;<templates>;<transaction>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    const SIGNED_TX: &str = "010000008d31d65d0000000069c07b268573a89eb2bf00a895d0ccd557b83af5490e15ca8d41dedc000000000191b5093377f21fc5a76435351504ce5eae7591380cc3502672fb23c2f230d65d00016f757a33cf3b4f83f2b37b2308090f949c6f3870d50ceb3e5aa59b3118c66d7240420f0000000000640000000000000000816f757a33cf3b4f83f2b37b2308090f949c6f3870d50ceb3e5aa59b3118c66d720100815a6d40702a7da0a810de9ba76091cf0f7df0b7b56b7a6ef280c9ff26c14fa178a313c5800bebda19cff9e745a346725838c9b5ecb388797bc04a21bca4a9077dc2140b805b6816ab2a35e692821b7904dcd8bbd52f14c7e5c095b1f20308";

    #[test]
    fn view_renders_display_fields() {
        let serializer = Serializer::for_profile(Profile::WithAnchor);
        let (tx, view) = serializer.decode_view(SIGNED_TX, true).unwrap();
        assert_eq!(
            view.anchor,
            "00000000dcde418dca150e49f53ab857d5ccd095a800bfb29ea87385267bc069"
        );
        assert_eq!(
            view.inputs,
            vec![InputView {
                txid: "5dd630f2c223fb722650c30c389175ae5ece0415353564a7c51ff2773309b591".into(),
                vout: 0
            }]
        );
        assert_eq!(
            view.address,
            "1dxtqmcyf7d7r7wnkfchgg28fjje6ye3gtm6epfjtmpdk2666dnsd7w8z"
        );
        assert_eq!(view.amount, 1_000_000);
        assert_eq!(view.sign.len(), 2 * 129);
        assert_eq!(view.sign, hex::encode(&tx.signature));
        assert_eq!(serializer.serialize_hex(&tx, true), SIGNED_TX);
    }

    #[test]
    fn view_without_signature_clears_it() {
        let serializer = Serializer::for_profile(Profile::WithAnchor);
        let (tx, view) = serializer.decode_view(SIGNED_TX, false).unwrap();
        assert!(!tx.is_signed());
        assert!(view.sign.is_empty());
    }

    #[test]
    fn view_serializes_to_json() {
        let serializer = Serializer::for_profile(Profile::WithAnchor);
        let (_, view) = serializer.decode_view(SIGNED_TX, false).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], 0);
        assert_eq!(json["inputs"][0]["vout"], 0);
    }

    #[test]
    fn envelope_roundtrip() {
        let data = TxData::new("0200aa,0500bb", "0100");
        let encoded = data.to_string();
        assert_eq!(encoded, "enc;0200aa,0500bb;0100");
        assert_eq!(encoded.parse::<TxData>().unwrap(), data);
        assert!(data.contains_multisig());
        assert!(!TxData::new("0500bb", "").contains_multisig());
    }

    #[test]
    fn envelope_rejects_malformed_strings() {
        assert!("plain;a;b".parse::<TxData>().is_err());
        assert!("enc;a".parse::<TxData>().is_err());
        assert!("enc;a;b;c".parse::<TxData>().is_err());
    }
}
