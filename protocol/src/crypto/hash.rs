//! # Hashing
//!
//! One hash function, one output size: blake2b truncated to 32 bytes by
//! parameter (not by slicing a 64-byte digest, which yields different bytes).
//! Signing hashes, transaction ids and template ids all go through
//! [`blake2b_256`].

use blake2b_simd::Params;

use crate::config::HASH_LENGTH;

/// blake2b with a 32-byte output length, no key, no personalization.
///
/// ```
/// use bbc_protocol::crypto::blake2b_256;
///
/// let digest = blake2b_256(b"");
/// assert_eq!(
///     hex::encode(digest),
///     "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
/// );
/// ```
pub fn blake2b_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let hash = Params::new().hash_length(HASH_LENGTH).hash(data);
    let mut out = [0u8; HASH_LENGTH];
    out.copy_from_slice(hash.as_bytes());
    out
}
