// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # BBC Protocol: Offline Transaction Codec
//!
//! Everything a wallet needs to build, inspect and sign transactions for a
//! BigBang-family ledger without talking to a node: the binary wire format,
//! the radix-32 address format, template ids, and M-of-N partial signatures.
//!
//! ## Architecture
//!
//! - **encoding**: little-endian streams, the variable-length size codec, 256-bit values.
//! - **address**: `1...`/`2...` addresses and the destination they name.
//! - **crypto**: blake2b-256, Ed25519 keys in display orientation, partial signatures.
//! - **template**: template data, ids, and the multisig template body.
//! - **transaction**: the raw record, its serializer, builder, hashes and signing.
//! - **config**: wire constants and the [`CodecConfig`] handed to a [`Serializer`].
//! - **error**: the [`CodecError`] kinds every operation returns.
//!
//! ## Byte Order
//!
//! The ledger stores hashes and keys reversed relative to the hex it prints.
//! [`Uint256`](encoding::Uint256) holds the wire orientation and is the only
//! place the reversal happens; everything else passes display hex in and out.
//!
//! ## Example
//!
//! ```
//! use bbc_protocol::{Profile, Serializer, TxBuilder};
//!
//! let serializer = Serializer::for_profile(Profile::WithAnchor);
//! let tx = TxBuilder::new()
//!     .anchor("00000000b0a9be545f022309e148894d1e1c853ccac3ef04cb6f5e5c70f41a70")
//!     .timestamp(1_590_474_715)
//!     .input("5ec5e3989f7c93addc642d0a3fb6cd911b22a3017ebd971894327080aea2e782", 1)
//!     .address("1fhtnq5n1b9bte99x5fw0m7cw9jm4n6kgv9nbeynscsgzryvhjf7ny9tm")
//!     .amount(1.23)
//!     .fee(0.01)
//!     .build()
//!     .unwrap();
//!
//! let hex = serializer.serialize_hex(&tx, true);
//! assert_eq!(serializer.deserialize_hex(&hex).unwrap(), tx);
//! ```

pub mod address;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod template;
pub mod transaction;

pub use address::{address_to_public_key_hex, Destination, DestinationKind};
pub use config::{CodecConfig, DecodeMode, Profile};
pub use crypto::{seed_to_public_key_hex, KeyPair, PrivateKey, PublicKey};
pub use error::{CodecError, Decoded, FieldError, FieldFailure};
pub use template::{MultisigTemplate, TemplateData, TemplateList, TemplateType};
pub use transaction::{
    sign_with_private_key, RawTransaction, Serializer, TransactionView, TxBuilder, TxData, TxInput,
};
