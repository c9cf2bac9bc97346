//! # Cryptographic Primitives
//!
//! Thin wrappers around audited implementations:
//!
//! - **blake2b-256** for signing hashes, transaction ids and template ids.
//! - **Ed25519** for signatures, through ed25519-dalek.
//!
//! Plus the one piece of protocol-specific composition: the partial
//! signature that M-of-N signers fill in one at a time.

pub mod hash;
pub mod keys;
pub mod multisig;

pub use hash::blake2b_256;
pub use keys::{seed_to_public_key_hex, KeyPair, PrivateKey, PublicKey};
pub use multisig::{multi_sign, PartialSignature};
