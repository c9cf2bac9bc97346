//! # Keys
//!
//! Ed25519 keys as the ledger presents them.
//!
//! The 32-byte seed and the 32-byte public key are both shown to users as
//! hex of the *reversed* raw bytes. Everything here accepts and produces
//! that display form; the raw order only exists inside [`Uint256`] and
//! ed25519-dalek.
//!
//! ## Security considerations
//!
//! - Seeds are held in a `SigningKey`, which zeroizes on drop.
//! - Key generation uses `OsRng`.
//! - Seed bytes are never logged and never appear in `Debug` output.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;

use crate::address::{self, Destination};
use crate::config::{SEED_LENGTH, SIGNATURE_LENGTH};
use crate::encoding::Uint256;
use crate::error::CodecError;

fn display_hex_32(field: &'static str, s: &str) -> Result<Uint256, CodecError> {
    if s.len() != 2 * SEED_LENGTH {
        return Err(CodecError::InvalidKeyMaterial {
            field,
            reason: format!("expected {} hex characters, got {}", 2 * SEED_LENGTH, s.len()),
        });
    }
    Uint256::from_display_hex(field, s)
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// An ed25519 seed.
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Parses the display hex of a seed.
    pub fn from_display_hex(s: &str) -> Result<Self, CodecError> {
        let wire = display_hex_32("private_key", s)?;
        Ok(Self::from_seed(wire.as_wire_bytes()))
    }

    /// Seed in raw (ed25519) order.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    pub fn to_display_hex(&self) -> String {
        Uint256::from_wire_bytes(self.signing_key.to_bytes()).to_display_hex()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(Uint256::from_wire_bytes(
            self.signing_key.verifying_key().to_bytes(),
        ))
    }

    /// Signs `message` as-is. Output is raw, not reversed.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(pub={})", self.public_key())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// An ed25519 public key. Not checked to be a valid curve point; template
/// members are taken as given.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey(Uint256);

impl PublicKey {
    pub fn from_display_hex(s: &str) -> Result<Self, CodecError> {
        Ok(Self(display_hex_32("public_key", s)?))
    }

    pub fn from_wire_bytes(bytes: [u8; 32]) -> Self {
        Self(Uint256::from_wire_bytes(bytes))
    }

    pub fn from_address(address: &str) -> Result<Self, CodecError> {
        Self::from_display_hex(&address::address_to_public_key_hex(address)?)
    }

    pub fn as_uint256(&self) -> &Uint256 {
        &self.0
    }

    pub fn as_wire_bytes(&self) -> &[u8; 32] {
        self.0.as_wire_bytes()
    }

    pub fn to_display_hex(&self) -> String {
        self.0.to_display_hex()
    }

    pub fn destination(&self) -> Destination {
        Destination::public_key(self.0)
    }

    pub fn to_address(&self) -> String {
        self.destination().to_address()
    }

    /// Checks a raw 64-byte ed25519 signature. Malformed keys or signatures
    /// simply fail.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(self.as_wire_bytes()) else {
            return false;
        };
        let Ok(bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            return false;
        };
        key.verify(message, &Signature::from_bytes(&bytes)).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_display_hex())
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A fresh or imported key with its public half and address precomputed.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Draws a new seed from the OS RNG.
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey {
            signing_key: SigningKey::generate(&mut OsRng),
        })
    }

    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    pub fn from_private_key_hex(s: &str) -> Result<Self, CodecError> {
        Ok(Self::from_private_key(PrivateKey::from_display_hex(s)?))
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn private_key_hex(&self) -> String {
        self.private_key.to_display_hex()
    }

    pub fn public_key_hex(&self) -> String {
        self.public_key.to_display_hex()
    }

    pub fn address(&self) -> String {
        self.public_key.to_address()
    }
}

/// Public key display hex for a seed display hex.
pub fn seed_to_public_key_hex(seed_hex: &str) -> Result<String, CodecError> {
    Ok(PrivateKey::from_display_hex(seed_hex)?
        .public_key()
        .to_display_hex())
}
