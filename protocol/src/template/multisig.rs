//! M-of-N multisig template body.
//!
//! ```text
//! M[1] ++ N[8 LE] ++ N * (public_key[32] ++ weight[1])
//! ```
//!
//! Some wallets write `N` with the variable-length size codec instead of a
//! fixed u64. That form is accepted only when the fixed reading does not
//! account for the body exactly and the compact one does.

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::keys::PublicKey;
use crate::crypto::multisig::PartialSignature;
use crate::encoding::{size, Decoder, Encoder};
use crate::error::CodecError;

use super::{TemplateData, TemplateType};

const MEMBER_LENGTH: usize = PUBLIC_KEY_LENGTH + 1;
const WIDE_COUNT_LENGTH: usize = 8;

/// How the member count was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountEncoding {
    /// Fixed 8-byte little-endian.
    #[default]
    Wide,
    /// Size codec.
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisigMember {
    pub public_key: PublicKey,
    pub weight: u8,
}

/// Parsed M-of-N template. Member order is significant: it fixes the
/// template id and the slot each signer's share lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigTemplate {
    required: u8,
    members: Vec<MultisigMember>,
    count_encoding: CountEncoding,
}

fn invalid(reason: impl Into<String>) -> CodecError {
    CodecError::InvalidTemplateEncoding {
        reason: reason.into(),
    }
}

impl MultisigTemplate {
    /// Builds a template; requires at least one member and
    /// `1 <= required <= total weight`.
    pub fn new(required: u8, members: Vec<MultisigMember>) -> Result<Self, CodecError> {
        let template = Self {
            required,
            members,
            count_encoding: CountEncoding::Wide,
        };
        template.validate()?;
        Ok(template)
    }

    /// Equal-weight template over `keys`.
    pub fn with_keys(required: u8, keys: &[PublicKey]) -> Result<Self, CodecError> {
        let members = keys
            .iter()
            .map(|&public_key| MultisigMember {
                public_key,
                weight: 1,
            })
            .collect();
        Self::new(required, members)
    }

    /// Parses a body (the template without its type tag).
    pub fn parse_body(body: &[u8]) -> Result<Self, CodecError> {
        let (&required, rest) = body
            .split_first()
            .ok_or_else(|| invalid("empty multisig body"))?;

        let wide = rest
            .get(..WIDE_COUNT_LENGTH)
            .map(|n| u64::from_le_bytes([n[0], n[1], n[2], n[3], n[4], n[5], n[6], n[7]]));
        let (count, offset, count_encoding) = match wide {
            Some(n) if holds_exactly(rest.len() - WIDE_COUNT_LENGTH, n) => {
                (n, WIDE_COUNT_LENGTH, CountEncoding::Wide)
            }
            _ => match size::decode_size(rest) {
                Ok((n, used)) if holds_exactly(rest.len() - used, n) => {
                    (n, used, CountEncoding::Compact)
                }
                _ => {
                    return Err(invalid(format!(
                        "{}-byte body does not match its declared member count{}",
                        body.len(),
                        wide.map(|n| format!(" {n}")).unwrap_or_default()
                    )))
                }
            },
        };

        let mut decoder = Decoder::new(&rest[offset..]);
        let mut members = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key = decoder
                .read_fixed::<PUBLIC_KEY_LENGTH>("member_key")
                .map_err(|e| invalid(e.to_string()))?;
            let weight = decoder
                .read_u8("member_weight")
                .map_err(|e| invalid(e.to_string()))?;
            members.push(MultisigMember {
                public_key: PublicKey::from_wire_bytes(key),
                weight,
            });
        }

        let template = Self {
            required,
            members,
            count_encoding,
        };
        template.validate()?;
        Ok(template)
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.members.is_empty() {
            return Err(invalid("multisig template has no members"));
        }
        if self.required == 0 {
            return Err(invalid("multisig threshold is zero"));
        }
        let total = self.total_weight();
        if u32::from(self.required) > total {
            return Err(invalid(format!(
                "threshold {} exceeds total weight {total}",
                self.required
            )));
        }
        Ok(())
    }

    /// `M`: weight needed to spend.
    pub fn required(&self) -> u8 {
        self.required
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[MultisigMember] {
        &self.members
    }

    pub fn count_encoding(&self) -> CountEncoding {
        self.count_encoding
    }

    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.members.iter().map(|m| m.public_key).collect()
    }

    pub fn member_index(&self, key: &PublicKey) -> Option<usize> {
        self.members.iter().position(|m| m.public_key == *key)
    }

    pub fn total_weight(&self) -> u32 {
        self.members.iter().map(|m| u32::from(m.weight)).sum()
    }

    /// Sum of weights of members marked in `partial`.
    pub fn signed_weight(&self, partial: &PartialSignature) -> u32 {
        partial
            .signed_members()
            .into_iter()
            .filter_map(|i| self.members.get(i))
            .map(|m| u32::from(m.weight))
            .sum()
    }

    /// Whether enough members have contributed a share. Shares are not
    /// verified.
    pub fn has_threshold(&self, partial: &PartialSignature) -> bool {
        self.signed_weight(partial) >= u32::from(self.required)
    }

    /// Reads the partial signature that follows this template in a
    /// signature field.
    pub fn partial_signature(&self, aggregate: &[u8]) -> Result<PartialSignature, CodecError> {
        PartialSignature::parse(self.member_count(), aggregate)
    }

    pub fn encode_body(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(1 + WIDE_COUNT_LENGTH + self.members.len() * MEMBER_LENGTH);
        enc.write_u8(self.required);
        match self.count_encoding {
            CountEncoding::Wide => enc.write_u64_le(self.members.len() as u64),
            CountEncoding::Compact => enc.write_size(self.members.len() as u64),
        }
        for member in &self.members {
            enc.write_bytes(member.public_key.as_wire_bytes());
            enc.write_u8(member.weight);
        }
        enc.into_inner()
    }

    pub fn to_template_data(&self) -> TemplateData {
        TemplateData::new(TemplateType::Multisig, self.encode_body())
    }
}

/// Whether `len` bytes are exactly `count` members.
fn holds_exactly(len: usize, count: u64) -> bool {
    usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(MEMBER_LENGTH))
        .is_some_and(|needed| needed == len)
}
