//! Error types for the stream pipeline.

use std::io;
use thiserror::Error;

/// Errors surfaced by the stream framing operations.
///
/// All variants are unrecoverable for the operation that produced them: the
/// pipeline stops at the failure point and nothing further is written.
#[derive(Debug, Error)]
pub enum DesError {
    /// Ciphertext length is not a positive multiple of the 8-byte block
    /// size. Such input was not produced by this scheme and is rejected
    /// outright instead of being truncated or zero-padded.
    #[error("ciphertext length {length} is not a positive multiple of 8 bytes")]
    MalformedLength { length: u64 },

    /// Reading the input stream failed.
    #[error("read failed at byte offset {} (block {})", .offset, .offset / 8)]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Writing the output stream failed.
    #[error("write failed at byte offset {} (block {})", .offset, .offset / 8)]
    Write {
        offset: u64,
        #[source]
        source: io::Error,
    },
}
