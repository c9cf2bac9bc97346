//! M-of-N signing across independent signers.
//!
//! Each signer only ever sees the transaction hex and the template list, the
//! way co-signers exchange them through the `enc;` envelope. The tests check
//! that the final signature does not depend on who signed first and that
//! mismatched template data is refused instead of silently producing a
//! signature the network would reject.

mod common;

use bbc_protocol::crypto::{multi_sign, PartialSignature};
use bbc_protocol::transaction::compose_signature;
use bbc_protocol::{
    sign_with_private_key, CodecError, KeyPair, MultisigTemplate, PrivateKey, Profile, PublicKey,
    RawTransaction, Serializer, TemplateData, TemplateList, TxData,
};

use common::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn serializer() -> Serializer {
    Serializer::for_profile(Profile::WithAnchor)
}

fn member_keys() -> Vec<PublicKey> {
    MEMBERS
        .iter()
        .map(|(_, pubkey)| PublicKey::from_display_hex(pubkey).unwrap())
        .collect()
}

fn two_of_three() -> TemplateData {
    MultisigTemplate::with_keys(2, &member_keys())
        .unwrap()
        .to_template_data()
}

fn unsigned() -> RawTransaction {
    serializer().deserialize_hex(UNSIGNED_TX).unwrap()
}

/// Signs `tx` once per seed, in order, through the public entry point.
fn sign_in_order(template_hex: &str, seeds: &[&str]) -> RawTransaction {
    let serializer = serializer();
    let mut tx = unsigned();
    for seed in seeds {
        sign_with_private_key(&serializer, &mut tx, template_hex, seed).unwrap();
    }
    tx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn signing_order_does_not_matter() {
    init_tracing();
    let tpl = two_of_three().to_hex();
    let a_then_b = sign_in_order(&tpl, &[MEMBERS[0].0, MEMBERS[1].0]);
    let b_then_a = sign_in_order(&tpl, &[MEMBERS[1].0, MEMBERS[0].0]);
    assert_eq!(a_then_b.signature, b_then_a.signature);
    assert_eq!(
        serializer().transaction_id(&a_then_b),
        serializer().transaction_id(&b_then_a)
    );
}

#[test]
fn threshold_is_reached_by_the_second_signer() {
    let data = two_of_three();
    let template = data.multisig().unwrap();
    let prefix_len = data.body().len();

    let one = sign_in_order(&data.to_hex(), &[MEMBERS[2].0]);
    let partial = template.partial_signature(&one.signature[prefix_len..]).unwrap();
    assert_eq!(partial.signed_members(), vec![2]);
    assert!(!template.has_threshold(&partial));

    let two = sign_in_order(&data.to_hex(), &[MEMBERS[2].0, MEMBERS[0].0]);
    let partial = template.partial_signature(&two.signature[prefix_len..]).unwrap();
    assert_eq!(partial.signed_members(), vec![0, 2]);
    assert!(template.has_threshold(&partial));

    // Every share verifies against its member's key.
    let hash = serializer().signing_hash(&two);
    for member in partial.signed_members() {
        let share = partial.share(member).unwrap();
        assert!(template.members()[member].public_key.verify(&hash, share));
    }
}

#[test]
fn signing_twice_with_the_same_key_is_idempotent() {
    let tpl = two_of_three().to_hex();
    let once = sign_in_order(&tpl, &[MEMBERS[0].0]);
    let twice = sign_in_order(&tpl, &[MEMBERS[0].0, MEMBERS[0].0]);
    assert_eq!(once.signature, twice.signature);
}

#[test]
fn outsider_cannot_sign() {
    let serializer = serializer();
    let mut tx = unsigned();
    let outsider = KeyPair::generate();
    let err = sign_with_private_key(
        &serializer,
        &mut tx,
        &two_of_three().to_hex(),
        &outsider.private_key_hex(),
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::SignerNotInTemplate { .. }));
    assert!(!tx.is_signed());
}

#[test]
fn resuming_with_other_template_data_is_refused() {
    let serializer = serializer();
    let mut tx = sign_in_order(&two_of_three().to_hex(), &[MEMBERS[0].0]);
    let before = tx.clone();

    let three_of_three = MultisigTemplate::with_keys(3, &member_keys())
        .unwrap()
        .to_template_data();
    let err = sign_with_private_key(&serializer, &mut tx, &three_of_three.to_hex(), MEMBERS[1].0)
        .unwrap_err();
    assert_eq!(err, CodecError::TemplateMismatch);
    assert_eq!(tx, before);
}

#[test]
fn extra_templates_are_prefixed_in_list_order() {
    let data = two_of_three();
    let list = format!("0500aabb,{}", data.to_hex());
    let tx = sign_in_order(&list, &[MEMBERS[1].0]);

    let mut expected_prefix = vec![0xaa, 0xbb];
    expected_prefix.extend_from_slice(data.body());
    assert!(tx.signature.starts_with(&expected_prefix));

    let templates = TemplateList::parse(&list).unwrap();
    assert_eq!(templates.signature_prefix(), expected_prefix);
    assert_eq!(templates.to_string(), list);
}

#[test]
fn compose_signature_leaves_the_transaction_alone() {
    let serializer = serializer();
    let tx = unsigned();
    let templates = TemplateList::parse(&two_of_three().to_hex()).unwrap();
    let key = PrivateKey::from_display_hex(MEMBERS[0].0).unwrap();

    let signature = compose_signature(&serializer, &tx, &templates, &key).unwrap();
    assert!(!signature.is_empty());
    assert!(!tx.is_signed());
}

#[test]
fn multi_sign_matches_signing_through_the_transaction() {
    let serializer = serializer();
    let data = two_of_three();
    let keys = member_keys();
    let hash = serializer.signing_hash(&unsigned());

    let mut aggregate = Vec::new();
    for (seed, _) in &MEMBERS[..2] {
        let signer = PrivateKey::from_display_hex(seed).unwrap();
        aggregate = multi_sign(&keys, &signer, &hash, &aggregate).unwrap();
    }

    let tx = sign_in_order(&data.to_hex(), &[MEMBERS[0].0, MEMBERS[1].0]);
    assert_eq!(&tx.signature[data.body().len()..], aggregate.as_slice());

    let partial = PartialSignature::parse(keys.len(), &aggregate).unwrap();
    assert_eq!(partial.to_bytes(), aggregate);
}

#[test]
fn envelope_hand_off_between_signers() {
    let serializer = serializer();
    let tpl = two_of_three().to_hex();

    // Coordinator wraps the unsigned transaction.
    let envelope = TxData::new(tpl.clone(), serializer.serialize_hex(&unsigned(), true)).to_string();

    // First signer.
    let received: TxData = envelope.parse().unwrap();
    assert!(received.contains_multisig());
    let mut tx = serializer.deserialize_hex(&received.tx_hex).unwrap();
    sign_with_private_key(&serializer, &mut tx, &received.tpl_hex, MEMBERS[2].0).unwrap();
    let envelope = TxData::new(received.tpl_hex, serializer.serialize_hex(&tx, true)).to_string();

    // Second signer.
    let received: TxData = envelope.parse().unwrap();
    let mut tx = serializer.deserialize_hex(&received.tx_hex).unwrap();
    sign_with_private_key(&serializer, &mut tx, &received.tpl_hex, MEMBERS[1].0).unwrap();

    assert_eq!(tx, sign_in_order(&tpl, &[MEMBERS[1].0, MEMBERS[2].0]));
}

#[test]
fn reference_template_parses_and_addresses() {
    let data = TemplateData::from_hex("0200020300000000000000efa449f09cc21c84179c3545674cf6274ad3d2b137fd358bd642b1835871a13401b4a73d1fdb6084d65a0c17ac80388c079e0d0abfb6d786a2440cff9ed748a84901b19c0c2be5e7a35b2de54b6f0753905815ba0a0b77b77cc3793f2063a37711a501").unwrap();
    let template = data.multisig().unwrap();
    assert_eq!(template.required(), 2);
    assert_eq!(template.member_count(), 3);
    assert!(data.address().starts_with('2'));
    assert_eq!(data.id().as_wire_bytes()[..2], [0x02, 0x00]);
}
