//! DES-family 64-bit Block Cipher in Rust
//!
//! This crate implements a 16-round Feistel cipher over 64-bit blocks with a
//! 64-bit key (56 effective bits), together with the stream pipeline that
//! frames arbitrary byte streams into 8-byte blocks and manages end-of-stream
//! padding.
//!
//! # Parameters
//! - Block size: 64 bits
//! - Key size: 64 bits (8 parity bits, unchecked)
//! - Number of rounds: 16
//! - Round subkeys: 16 x 48 bits
//!
//! Blocks are ciphered independently (unchained mode, no IV, no integrity
//! check) and the trailing padding run is the only end-of-stream marker.
//! Both properties are preserved on purpose to stay compatible with
//! existing streams; see the module docs in [`mod@error`] and the stream
//! functions for the failure contract.
//!
//! # Example
//!
//! ```
//! use des64_rs::{decrypt_slice, encrypt_slice, Des};
//!
//! let cipher = Des::new(0x0011223344556677);
//! let ciphertext = encrypt_slice(&cipher, b"attack at dawn");
//! let recovered = decrypt_slice(&cipher, &ciphertext).unwrap();
//! assert_eq!(recovered, b"attack at dawn");
//! ```

pub mod error;

mod cipher;
mod stream;
mod tables;

pub use cipher::Des;
pub use error::DesError;
pub use stream::{decrypt_slice, decrypt_stream, encrypt_slice, encrypt_stream, BLOCK_SIZE};
