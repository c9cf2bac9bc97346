//! Signing a transaction, single-key or M-of-N.
//!
//! The signature field always has the shape
//!
//! ```text
//! template bodies (list order) ++ signature part
//! ```
//!
//! where the signature part is a plain 64-byte ed25519 signature for a
//! single-key spend, or the partial-signature aggregate when one of the
//! templates is multisig. A multisig spend is signed by calling this once
//! per member, passing the transaction from the previous call along.

use tracing::debug;

use super::serializer::Serializer;
use super::types::RawTransaction;
use crate::crypto::keys::PrivateKey;
use crate::crypto::multisig::multi_sign;
use crate::error::CodecError;
use crate::template::TemplateList;

/// Computes the signature field `tx` should carry after `key` signs it.
///
/// `tx` is not modified. Fails with [`CodecError::AlreadySigned`] when a
/// single-key spend already carries signature bytes, and with
/// [`CodecError::TemplateMismatch`] when a multisig spend is resumed with
/// template data other than the data it was started with.
pub fn compose_signature(
    serializer: &Serializer,
    tx: &RawTransaction,
    templates: &TemplateList,
    key: &PrivateKey,
) -> Result<Vec<u8>, CodecError> {
    let mut signature = templates.signature_prefix();

    let Some(multisig) = templates.multisig() else {
        if tx.is_signed() {
            return Err(CodecError::AlreadySigned);
        }
        debug!(templates = templates.templates().len(), "signing single-key spend");
        signature.extend_from_slice(&key.sign(&serializer.signing_hash(tx)));
        return Ok(signature);
    };

    let existing: &[u8] = match tx.signature.strip_prefix(signature.as_slice()) {
        Some(part) => part,
        None if tx.signature.is_empty() => &[],
        None => return Err(CodecError::TemplateMismatch),
    };
    let template = multisig.multisig()?;
    debug!(
        members = template.member_count(),
        required = template.required(),
        resumed = !existing.is_empty(),
        "signing multisig spend"
    );

    let part = multi_sign(
        &template.public_keys(),
        key,
        &serializer.signing_hash(tx),
        existing,
    )?;
    signature.extend_from_slice(&part);
    Ok(signature)
}

/// Signs `tx` in place.
///
/// `template_list` is the comma-separated template hex list (empty when the
/// destination being spent is a plain public key); `private_key_hex` is the
/// seed in display hex. On error `tx` is left as it was.
pub fn sign_with_private_key(
    serializer: &Serializer,
    tx: &mut RawTransaction,
    template_list: &str,
    private_key_hex: &str,
) -> Result<(), CodecError> {
    let templates = TemplateList::parse(template_list)?;
    let key = PrivateKey::from_display_hex(private_key_hex)?;
    tx.signature = compose_signature(serializer, tx, &templates, &key)?;
    Ok(())
}
