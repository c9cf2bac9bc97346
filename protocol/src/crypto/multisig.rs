//! # Partial Signatures
//!
//! The signature part of an M-of-N spend is built up one signer at a time:
//!
//! ```text
//! bitmap[ceil(N / 8)] ++ share[64] * popcount(bitmap)
//! ```
//!
//! Bit `i % 8` of byte `i / 8` is set once member `i` (template order) has
//! signed. Shares follow in member order, not in the order signers showed
//! up, so A-then-B and B-then-A produce identical bytes.
//!
//! Nothing here checks whether a share is a valid signature; that is the
//! node's job.
//!
//! This layout has not been checked against the node's multisig verifier.
//! Treat it as this crate's own format: partial signatures round-trip
//! between signers using this library, but a node may reject the final
//! aggregate until the layout is confirmed against real multisig spends.

use tracing::trace;

use super::keys::{PrivateKey, PublicKey};
use crate::config::SIGNATURE_LENGTH;
use crate::error::CodecError;

/// Decoded signature part of a multisig spend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSignature {
    member_count: usize,
    bitmap: Vec<u8>,
    shares: Vec<[u8; SIGNATURE_LENGTH]>,
}

impl PartialSignature {
    /// No member has signed yet.
    pub fn empty(member_count: usize) -> Self {
        Self {
            member_count,
            bitmap: vec![0u8; bitmap_len(member_count)],
            shares: Vec::new(),
        }
    }

    /// Parses an existing aggregate. Empty input is the empty aggregate.
    pub fn parse(member_count: usize, bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.is_empty() {
            return Ok(Self::empty(member_count));
        }

        let map_len = bitmap_len(member_count);
        if bytes.len() < map_len {
            return Err(CodecError::InvalidPartialSignature {
                reason: format!("{} bytes is shorter than the {map_len}-byte bitmap", bytes.len()),
            });
        }
        let (bitmap, rest) = bytes.split_at(map_len);

        let marked = (0..map_len * 8).filter(|&i| bit_is_set(bitmap, i));
        if let Some(stray) = marked.clone().find(|&i| i >= member_count) {
            return Err(CodecError::InvalidPartialSignature {
                reason: format!("bit {stray} set for a template of {member_count} members"),
            });
        }
        let signed = marked.count();
        if rest.len() != signed * SIGNATURE_LENGTH {
            return Err(CodecError::InvalidPartialSignature {
                reason: format!(
                    "{signed} members marked but {} share bytes follow",
                    rest.len()
                ),
            });
        }

        let shares = rest
            .chunks_exact(SIGNATURE_LENGTH)
            .map(|chunk| {
                let mut share = [0u8; SIGNATURE_LENGTH];
                share.copy_from_slice(chunk);
                share
            })
            .collect();

        Ok(Self {
            member_count,
            bitmap: bitmap.to_vec(),
            shares,
        })
    }

    pub fn member_count(&self) -> usize {
        self.member_count
    }

    pub fn is_signed(&self, member: usize) -> bool {
        member < self.member_count && bit_is_set(&self.bitmap, member)
    }

    /// Indices of members that have contributed a share, ascending.
    pub fn signed_members(&self) -> Vec<usize> {
        (0..self.member_count).filter(|&i| self.is_signed(i)).collect()
    }

    /// Share contributed by `member`, if any.
    pub fn share(&self, member: usize) -> Option<&[u8; SIGNATURE_LENGTH]> {
        if !self.is_signed(member) {
            return None;
        }
        self.shares.get(self.rank(member))
    }

    /// Adds a share for `member`. A member that already signed keeps its
    /// existing share.
    pub fn insert(&mut self, member: usize, share: [u8; SIGNATURE_LENGTH]) -> Result<(), CodecError> {
        if member >= self.member_count {
            return Err(CodecError::InvalidPartialSignature {
                reason: format!("member {member} out of range for {} members", self.member_count),
            });
        }
        if self.is_signed(member) {
            return Ok(());
        }
        let position = self.rank(member);
        self.shares.insert(position, share);
        self.bitmap[member / 8] |= 1 << (member % 8);
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bitmap.len() + self.shares.len() * SIGNATURE_LENGTH);
        out.extend_from_slice(&self.bitmap);
        for share in &self.shares {
            out.extend_from_slice(share);
        }
        out
    }

    /// Number of signed members before `member`.
    fn rank(&self, member: usize) -> usize {
        (0..member).filter(|&i| bit_is_set(&self.bitmap, i)).count()
    }
}

fn bitmap_len(member_count: usize) -> usize {
    member_count.div_ceil(8)
}

fn bit_is_set(bitmap: &[u8], index: usize) -> bool {
    bitmap
        .get(index / 8)
        .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
}

/// Adds `signer`'s share over `message` to the aggregate in `existing`.
///
/// `members` is the template's ordered key list. Returns the new aggregate;
/// `existing` is left untouched.
pub fn multi_sign(
    members: &[PublicKey],
    signer: &PrivateKey,
    message: &[u8],
    existing: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let public_key = signer.public_key();
    let member = members
        .iter()
        .position(|key| *key == public_key)
        .ok_or_else(|| CodecError::SignerNotInTemplate {
            public_key: public_key.to_display_hex(),
        })?;

    let mut partial = PartialSignature::parse(members.len(), existing)?;
    partial.insert(member, signer.sign(message))?;
    trace!(
        member,
        signed = partial.signed_members().len(),
        total = members.len(),
        "added multisig share"
    );
    Ok(partial.to_bytes())
}
