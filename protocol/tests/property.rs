//! Property-based tests for the codecs.
//!
//! Uses proptest to check round-trips and error detection across randomized
//! transactions, sizes and addresses.

use bbc_protocol::address::{self, base32::ALPHABET, Destination, DestinationKind};
use bbc_protocol::encoding::{decode_size, encode_size, encoded_size_len, Uint256};
use bbc_protocol::{CodecError, Profile, PublicKey, RawTransaction, Serializer, TxInput};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn uint256_strategy() -> impl Strategy<Value = Uint256> {
    any::<[u8; 32]>().prop_map(Uint256::from_wire_bytes)
}

fn destination_strategy() -> impl Strategy<Value = Destination> {
    (
        prop_oneof![Just(DestinationKind::PublicKey), Just(DestinationKind::Template)],
        uint256_strategy(),
    )
        .prop_map(|(kind, value)| Destination::new(kind, value))
}

fn input_strategy() -> impl Strategy<Value = TxInput> {
    (uint256_strategy(), any::<u8>()).prop_map(|(txid, vout)| TxInput::new(txid, vout))
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    prop_oneof![Just(Profile::WithAnchor), Just(Profile::WithoutAnchor)]
}

prop_compose! {
    /// Payloads cross the 253-byte boundary where the size prefix widens.
    fn transaction_strategy(profile: Profile)(
        version in any::<u16>(),
        tx_type in any::<u16>(),
        timestamp in any::<u32>(),
        lock_until in any::<u32>(),
        anchor in uint256_strategy(),
        inputs in prop::collection::vec(input_strategy(), 0..8),
        destination in destination_strategy(),
        amount in any::<i64>(),
        fee in any::<i64>(),
        payload in prop::collection::vec(any::<u8>(), 0..300),
        signature in prop::collection::vec(any::<u8>(), 0..200),
    ) -> RawTransaction {
        RawTransaction {
            version,
            tx_type,
            timestamp,
            lock_until,
            anchor: if profile.includes_anchor() { anchor } else { Uint256::ZERO },
            inputs,
            destination,
            amount,
            fee,
            payload,
            signature,
        }
    }
}

fn profiled_transaction() -> impl Strategy<Value = (Profile, RawTransaction)> {
    profile_strategy().prop_flat_map(|profile| (Just(profile), transaction_strategy(profile)))
}

// ============================================================================
// Transaction Properties
// ============================================================================

proptest! {
    /// Property: decode(encode(tx)) == tx under either profile.
    #[test]
    fn prop_transaction_roundtrip((profile, tx) in profiled_transaction()) {
        let serializer = Serializer::for_profile(profile);
        let bytes = serializer.serialize(&tx, true);
        prop_assert_eq!(serializer.deserialize(&bytes)?, tx);
    }

    /// Property: every strict prefix of a valid encoding is rejected.
    #[test]
    fn prop_truncation_is_reported(
        (profile, tx) in profiled_transaction(),
        cut in any::<prop::sample::Index>(),
    ) {
        let serializer = Serializer::for_profile(profile);
        let bytes = serializer.serialize(&tx, true);
        let len = cut.index(bytes.len());
        let result = serializer.deserialize(&bytes[..len]);
        prop_assert!(
            matches!(result, Err(CodecError::MalformedTransaction { .. })),
            "prefix of {} bytes accepted", len
        );
    }

    /// Property: the txid always starts with the big-endian timestamp.
    #[test]
    fn prop_txid_is_time_prefixed((profile, tx) in profiled_transaction()) {
        let serializer = Serializer::for_profile(profile);
        let txid = serializer.transaction_id(&tx);
        prop_assert_eq!(txid.len(), 64);
        let prefix = format!("{:08x}", tx.timestamp);
        prop_assert!(txid.starts_with(&prefix), "{} lacks prefix {}", txid, prefix);
    }

    /// Property: the signing hash does not see the signature field.
    #[test]
    fn prop_signing_hash_ignores_signature(
        (profile, tx) in profiled_transaction(),
        other in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let serializer = Serializer::for_profile(profile);
        let mut resigned = tx.clone();
        resigned.signature = other;
        prop_assert_eq!(serializer.signing_hash(&tx), serializer.signing_hash(&resigned));
    }
}

// ============================================================================
// Size Codec Properties
// ============================================================================

proptest! {
    /// Property: sizes round-trip and use the minimal width.
    #[test]
    fn prop_size_roundtrip(value in any::<u64>()) {
        let encoded = encode_size(value);
        prop_assert_eq!(encoded.len(), encoded_size_len(value));
        prop_assert_eq!(decode_size(&encoded)?, (value, encoded.len()));
    }

    /// Property: values near each marker boundary pick the right width.
    #[test]
    fn prop_size_boundaries(delta in 0u64..4) {
        for (boundary, below, above) in [
            (0xfd_u64, 1usize, 3usize),
            (0x1_0000, 3, 5),
            (0x1_0000_0000, 5, 9),
        ] {
            prop_assert_eq!(encoded_size_len(boundary - 1 - delta), below);
            prop_assert_eq!(encoded_size_len(boundary + delta), above);
        }
    }
}

// ============================================================================
// Address Properties
// ============================================================================

proptest! {
    /// Property: public-key addresses round-trip, in either case.
    #[test]
    fn prop_address_roundtrip(bytes in any::<[u8; 32]>()) {
        let key = PublicKey::from_wire_bytes(bytes);
        let printed = key.to_address();
        prop_assert_eq!(printed.len(), 57);
        prop_assert_eq!(PublicKey::from_address(&printed)?, key);
        prop_assert_eq!(PublicKey::from_address(&printed.to_ascii_uppercase())?, key);
    }

    /// Property: replacing any single symbol is caught by the checksum.
    #[test]
    fn prop_flipped_symbol_is_rejected(
        bytes in any::<[u8; 32]>(),
        position in 1usize..57,
        symbol in 0usize..32,
    ) {
        let printed = PublicKey::from_wire_bytes(bytes).to_address();
        let replacement = ALPHABET[symbol] as char;
        prop_assume!(printed.as_bytes()[position] as char != replacement);

        let mut corrupted = printed.clone();
        corrupted.replace_range(position..position + 1, &replacement.to_string());
        prop_assert!(
            matches!(
                address::decode(&corrupted),
                Err(CodecError::AddressChecksumMismatch { .. })
            ),
            "{} accepted", corrupted
        );
    }
}
