//! # Spending Templates
//!
//! A template is a binary spending condition: a 2-byte little-endian type
//! tag followed by a type-specific body. Its id (and therefore its `2...`
//! address) is derived from the body:
//!
//! ```text
//! id = tag[2 LE] ++ blake2b_256(body)[0..30]
//! ```
//!
//! When a template-guarded output is spent, the template bodies are written
//! in front of the signature, in the order the caller supplied them. Only
//! the multisig body is understood here (see [`multisig`]); every other kind
//! is carried as opaque bytes.

pub mod multisig;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Destination;
use crate::config::{
    HASH_LENGTH, TEMPLATE_DATA_SEPARATOR, TEMPLATE_HASH_PREFIX_LENGTH, TEMPLATE_TYPE_LENGTH,
};
use crate::crypto::blake2b_256;
use crate::encoding::Uint256;
use crate::error::CodecError;

pub use multisig::{CountEncoding, MultisigMember, MultisigTemplate};

// ---------------------------------------------------------------------------
// TemplateType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Weighted,
    Multisig,
    Fork,
    /// Proof-of-work mining.
    Proof,
    /// DPoS delegate.
    Delegate,
    Exchange,
    /// DPoS vote.
    Vote,
    Payment,
    DexOrder,
}

impl TemplateType {
    pub fn tag(self) -> u16 {
        match self {
            TemplateType::Weighted => 1,
            TemplateType::Multisig => 2,
            TemplateType::Fork => 3,
            TemplateType::Proof => 4,
            TemplateType::Delegate => 5,
            TemplateType::Exchange => 6,
            TemplateType::Vote => 7,
            TemplateType::Payment => 8,
            TemplateType::DexOrder => 9,
        }
    }

    pub fn from_tag(tag: u16) -> Option<Self> {
        Some(match tag {
            1 => TemplateType::Weighted,
            2 => TemplateType::Multisig,
            3 => TemplateType::Fork,
            4 => TemplateType::Proof,
            5 => TemplateType::Delegate,
            6 => TemplateType::Exchange,
            7 => TemplateType::Vote,
            8 => TemplateType::Payment,
            9 => TemplateType::DexOrder,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateType::Weighted => "weighted",
            TemplateType::Multisig => "multisig",
            TemplateType::Fork => "fork",
            TemplateType::Proof => "proof",
            TemplateType::Delegate => "delegate",
            TemplateType::Exchange => "exchange",
            TemplateType::Vote => "vote",
            TemplateType::Payment => "payment",
            TemplateType::DexOrder => "dexorder",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TemplateData
// ---------------------------------------------------------------------------

/// One template in binary form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateData {
    template_type: TemplateType,
    body: Vec<u8>,
}

impl TemplateData {
    pub fn new(template_type: TemplateType, body: Vec<u8>) -> Self {
        Self {
            template_type,
            body,
        }
    }

    /// Parses `tag ++ body`. Unknown tags are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < TEMPLATE_TYPE_LENGTH {
            return Err(CodecError::InvalidTemplateEncoding {
                reason: format!("{} bytes cannot hold a type tag", bytes.len()),
            });
        }
        let (tag, body) = bytes.split_at(TEMPLATE_TYPE_LENGTH);
        let tag = u16::from_le_bytes([tag[0], tag[1]]);
        let template_type =
            TemplateType::from_tag(tag).ok_or_else(|| CodecError::InvalidTemplateEncoding {
                reason: format!("unknown template type {tag}"),
            })?;
        Ok(Self::new(template_type, body.to_vec()))
    }

    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(s).map_err(|e| CodecError::hex("template_data", e))?;
        Self::from_bytes(&bytes)
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// The template without its type tag: what goes in front of a signature.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TEMPLATE_TYPE_LENGTH + self.body.len());
        out.extend_from_slice(&self.template_type.tag().to_le_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Template id in wire orientation.
    pub fn id(&self) -> Uint256 {
        let hash = blake2b_256(&self.body);
        let mut id = [0u8; HASH_LENGTH];
        id[..TEMPLATE_TYPE_LENGTH].copy_from_slice(&self.template_type.tag().to_le_bytes());
        id[TEMPLATE_TYPE_LENGTH..].copy_from_slice(&hash[..TEMPLATE_HASH_PREFIX_LENGTH]);
        Uint256::from_wire_bytes(id)
    }

    pub fn destination(&self) -> Destination {
        Destination::template(self.id())
    }

    pub fn address(&self) -> String {
        self.destination().to_address()
    }

    /// Interprets the body as an M-of-N template.
    pub fn multisig(&self) -> Result<MultisigTemplate, CodecError> {
        if self.template_type != TemplateType::Multisig {
            return Err(CodecError::InvalidTemplateEncoding {
                reason: format!("{} template is not multisig", self.template_type),
            });
        }
        MultisigTemplate::parse_body(&self.body)
    }
}

// ---------------------------------------------------------------------------
// TemplateList
// ---------------------------------------------------------------------------

/// The comma-separated template hex list handed to the signer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateList {
    templates: Vec<TemplateData>,
}

impl TemplateList {
    pub fn new(templates: Vec<TemplateData>) -> Self {
        Self { templates }
    }

    /// Parses `tpl1,tpl2,...`. Empty entries (including an empty string)
    /// are skipped.
    pub fn parse(list: &str) -> Result<Self, CodecError> {
        let templates = list
            .split(TEMPLATE_DATA_SEPARATOR)
            .filter(|entry| !entry.is_empty())
            .map(TemplateData::from_hex)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[TemplateData] {
        &self.templates
    }

    /// Every body concatenated in list order.
    pub fn signature_prefix(&self) -> Vec<u8> {
        self.templates
            .iter()
            .flat_map(|t| t.body().iter().copied())
            .collect()
    }

    /// The multisig entry, if any. With several, the last one wins.
    pub fn multisig(&self) -> Option<&TemplateData> {
        self.templates
            .iter()
            .rev()
            .find(|t| t.template_type() == TemplateType::Multisig)
    }

    pub fn contains_multisig(&self) -> bool {
        self.multisig().is_some()
    }
}

impl fmt::Display for TemplateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, template) in self.templates.iter().enumerate() {
            if i > 0 {
                write!(f, "{TEMPLATE_DATA_SEPARATOR}")?;
            }
            f.write_str(&template.to_hex())?;
        }
        Ok(())
    }
}
