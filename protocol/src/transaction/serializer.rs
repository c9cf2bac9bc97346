//! # Transaction Wire Codec
//!
//! ```text
//! version        u16 LE
//! tx_type        u16 LE
//! timestamp      u32 LE
//! lock_until     u32 LE
//! anchor         [32]          with-anchor profile only
//! input_count    size
//! inputs         input_count * (prev_txid[32] ++ vout u8)
//! destination    prefix u8 ++ [32]
//! amount         i64 LE
//! fee            i64 LE
//! payload_size   size
//! payload        [payload_size]
//! signature_size size
//! signature      [signature_size]
//! ```
//!
//! Writing cannot fail: every length is taken from the data itself.
//! Reading is purely structural. Trailing bytes after the signature are
//! ignored, as the reference node does.

use tracing::{debug, trace};

use crate::address::{Destination, DestinationKind};
use crate::config::{CodecConfig, DecodeMode, Profile, INPUT_RECORD_LENGTH, TX_FIXED_LENGTH};
use crate::encoding::{Decoder, Encoder, Uint256};
use crate::error::{CodecError, Decoded, FieldError, FieldFailure};

use super::types::{RawTransaction, TxInput};

/// Reads and writes transactions for one profile.
///
/// Holds its configuration by value; two serializers with different
/// settings can be used side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    config: CodecConfig,
}

impl Serializer {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn for_profile(profile: Profile) -> Self {
        Self::new(CodecConfig::for_profile(profile))
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn profile(&self) -> Profile {
        self.config.profile
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    /// Serializes `tx`. With `include_signature == false` the signature is
    /// written as empty whatever the record holds.
    pub fn serialize(&self, tx: &RawTransaction, include_signature: bool) -> Vec<u8> {
        let signature: &[u8] = if include_signature { &tx.signature } else { &[] };
        let mut enc = Encoder::with_capacity(
            TX_FIXED_LENGTH + tx.inputs.len() * INPUT_RECORD_LENGTH + tx.payload.len() + signature.len(),
        );

        enc.write_u16_le(tx.version);
        enc.write_u16_le(tx.tx_type);
        enc.write_u32_le(tx.timestamp);
        enc.write_u32_le(tx.lock_until);
        if self.config.profile.includes_anchor() {
            enc.write_bytes(tx.anchor.as_wire_bytes());
        }

        enc.write_size(tx.inputs.len() as u64);
        for input in &tx.inputs {
            enc.write_bytes(input.prev_txid.as_wire_bytes());
            enc.write_u8(input.vout);
        }

        enc.write_u8(tx.destination.kind.prefix());
        enc.write_bytes(tx.destination.value.as_wire_bytes());
        enc.write_i64_le(tx.amount);
        enc.write_i64_le(tx.fee);
        enc.write_var_bytes(&tx.payload);
        enc.write_var_bytes(signature);

        trace!(
            profile = %self.config.profile,
            include_signature,
            len = enc.len(),
            "serialized transaction"
        );
        enc.into_inner()
    }

    pub fn serialize_hex(&self, tx: &RawTransaction, include_signature: bool) -> String {
        hex::encode(self.serialize(tx, include_signature))
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    /// Parses a transaction according to the configured [`DecodeMode`].
    ///
    /// Either way a failure is [`CodecError::MalformedTransaction`]. The
    /// default collect-all mode lists every failing field; fail-fast lists
    /// only the first.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<RawTransaction, CodecError> {
        self.read(bytes, self.config.decode_mode).into_result()
    }

    /// Parses every field it can and reports every field it cannot.
    pub fn deserialize_collect(&self, bytes: &[u8]) -> Decoded<RawTransaction> {
        self.read(bytes, DecodeMode::CollectAll)
    }

    pub fn deserialize_hex(&self, tx_hex: &str) -> Result<RawTransaction, CodecError> {
        let bytes = hex::decode(tx_hex).map_err(|e| CodecError::hex("transaction", e))?;
        self.deserialize(&bytes)
    }

    fn read(&self, bytes: &[u8], mode: DecodeMode) -> Decoded<RawTransaction> {
        let mut r = FieldReader {
            decoder: Decoder::new(bytes),
            errors: Vec::new(),
            mode,
            log: self.config.diagnostics.log_field_errors,
        };
        let mut tx = RawTransaction {
            version: r.read(|d| d.read_u16_le("version")),
            tx_type: r.read(|d| d.read_u16_le("tx_type")),
            timestamp: r.read(|d| d.read_u32_le("timestamp")),
            lock_until: r.read(|d| d.read_u32_le("lock_until")),
            ..RawTransaction::default()
        };
        if self.config.profile.includes_anchor() {
            tx.anchor = Uint256::from_wire_bytes(r.read(|d| d.read_fixed("anchor")));
        }

        match r.try_read(|d| d.read_count("input_count", INPUT_RECORD_LENGTH)) {
            Some(count) => {
                tx.inputs.reserve(count);
                for _ in 0..count {
                    let prev_txid = Uint256::from_wire_bytes(r.read(|d| d.read_fixed("inputs")));
                    let vout = r.read(|d| d.read_u8("inputs"));
                    tx.inputs.push(TxInput::new(prev_txid, vout));
                }
            }
            None => r.skip("inputs"),
        }

        let prefix = r.try_read(|d| d.read_u8("destination_prefix"));
        let value = Uint256::from_wire_bytes(r.read(|d| d.read_fixed("destination")));
        let kind = match prefix.map(|p| (p, DestinationKind::from_prefix(p))) {
            Some((_, Some(kind))) => kind,
            Some((p, None)) => {
                r.reject("destination_prefix", FieldFailure::UnknownPrefix(p));
                DestinationKind::Null
            }
            None => DestinationKind::Null,
        };
        tx.destination = Destination::new(kind, value);

        tx.amount = r.read(|d| d.read_i64_le("amount"));
        tx.fee = r.read(|d| d.read_i64_le("fee"));

        match r.try_read(|d| d.read_count("payload_size", 1)) {
            Some(len) => tx.payload = r.read(|d| d.read_bytes("payload", len)),
            None => r.skip("payload"),
        }
        match r.try_read(|d| d.read_count("signature_size", 1)) {
            Some(len) => tx.signature = r.read(|d| d.read_bytes("signature", len)),
            None => r.skip("signature"),
        }

        if r.log && !r.decoder.is_empty() && r.errors.is_empty() {
            debug!(trailing = r.decoder.remaining(), "ignoring bytes after signature");
        }

        Decoded {
            value: tx,
            errors: r.errors,
        }
    }
}

/// Runs field reads, recording failures instead of returning them.
///
/// In fail-fast mode every read after the first failure is skipped and the
/// field keeps its default.
struct FieldReader<'a> {
    decoder: Decoder<'a>,
    errors: Vec<FieldError>,
    mode: DecodeMode,
    log: bool,
}

impl<'a> FieldReader<'a> {
    fn stopped(&self) -> bool {
        self.mode == DecodeMode::FailFast && !self.errors.is_empty()
    }

    fn record(&mut self, err: FieldError) {
        if self.log {
            debug!(field = err.field, failure = %err.failure, "transaction field failed to decode");
        }
        self.errors.push(err);
    }

    fn try_read<T>(
        &mut self,
        f: impl FnOnce(&mut Decoder<'a>) -> Result<T, FieldError>,
    ) -> Option<T> {
        if self.stopped() {
            return None;
        }
        match f(&mut self.decoder) {
            Ok(value) => Some(value),
            Err(err) => {
                self.record(err);
                None
            }
        }
    }

    fn read<T: Default>(&mut self, f: impl FnOnce(&mut Decoder<'a>) -> Result<T, FieldError>) -> T {
        self.try_read(f).unwrap_or_default()
    }

    fn reject(&mut self, field: &'static str, failure: FieldFailure) {
        if !self.stopped() {
            self.record(FieldError { field, failure });
        }
    }

    /// Marks a field whose length came from a size that failed.
    fn skip(&mut self, field: &'static str) {
        if self.mode == DecodeMode::CollectAll {
            self.record(FieldError {
                field,
                failure: FieldFailure::Skipped,
            });
        }
    }
}
