//! Signing hash and transaction id.
//!
//! ```text
//! signing_hash   = blake2b_256(serialize(tx, unsigned)[..len - 1])
//! transaction_id = hex(ts_be[4] ++ reverse(blake2b_256(serialize(tx, signed)))[4..])
//! ```
//!
//! The signing hash drops the single `0x00` that encodes the empty
//! signature, so it does not depend on how the signature is later attached.
//! The id starts with the timestamp so ids sort by creation time.

use crate::config::HASH_LENGTH;
use crate::crypto::blake2b_256;

use super::serializer::Serializer;
use super::types::RawTransaction;

impl Serializer {
    /// The message every signer signs.
    pub fn signing_hash(&self, tx: &RawTransaction) -> [u8; HASH_LENGTH] {
        let mut unsigned = self.serialize(tx, false);
        // The empty signature is always encoded as one literal byte.
        unsigned.pop();
        blake2b_256(&unsigned)
    }

    /// Transaction id bytes in display orientation.
    pub fn transaction_id_bytes(&self, tx: &RawTransaction) -> [u8; HASH_LENGTH] {
        let mut id = blake2b_256(&self.serialize(tx, true));
        id.reverse();
        id[..4].copy_from_slice(&tx.timestamp.to_be_bytes());
        id
    }

    /// Transaction id as the node prints it.
    pub fn transaction_id(&self, tx: &RawTransaction) -> String {
        hex::encode(self.transaction_id_bytes(tx))
    }
}
