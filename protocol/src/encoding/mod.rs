//! # Wire Encoding Primitives
//!
//! The low-level building blocks every other module serializes with:
//!
//! ```text
//! size.rs    variable-length size prefix (1, 3, 5 or 9 bytes)
//! stream.rs  Encoder / Decoder with per-field error attribution
//! uint256.rs 32-byte values and their reversed display orientation
//! ```
//!
//! All multi-byte integers are little-endian. Hashes and keys are stored in
//! wire orientation, which is the byte-reverse of their display hex string;
//! [`Uint256`] is the only place that reversal happens.

pub mod size;
pub mod stream;
pub mod uint256;

pub use size::{decode_size, encode_size, encoded_size_len};
pub use stream::{Decoder, Encoder};
pub use uint256::Uint256;
