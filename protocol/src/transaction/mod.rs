//! # Transaction Module
//!
//! Wire codec, hashing, construction and signing of raw ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      : RawTransaction and TxInput, the record as it travels on the wire
//! serializer.rs : Serializer, profile-aware encode/decode with field-attributed errors
//! digest.rs     : signing hash and timestamp-prefixed transaction id
//! builder.rs    : TxBuilder, assembles unsigned transactions from display values
//! signing.rs    : single-key and multisig signature composition
//! payload.rs    : VchData, the structured payload header
//! view.rs       : display view of a decoded transaction and the co-signer envelope
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TxBuilder`] produces an unsigned [`RawTransaction`].
//! 2. **Hand off**: serialize it and wrap it with its templates in a [`TxData`] envelope.
//! 3. **Sign**: each signer calls [`sign_with_private_key`]; multisig shares accumulate.
//! 4. **Broadcast**: the fully signed hex goes to a node. The id is [`Serializer::transaction_id`].

pub mod builder;
pub mod digest;
pub mod payload;
pub mod serializer;
pub mod signing;
pub mod types;
pub mod view;

pub use builder::{coins_to_units, TxBuilder};
pub use payload::{encode_data_hex, VchData};
pub use serializer::Serializer;
pub use signing::{compose_signature, sign_with_private_key};
pub use types::{RawTransaction, TxInput};
pub use view::{InputView, TransactionView, TxData};
