//! Error type for cipher construction and block handling.

use thiserror::Error;

/// Errors reported by the cipher core.
///
/// All of them are raised before any transform work starts: configuration
/// problems at construction, buffer sizes at the top of each block call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Key is not 16, 24 or 32 bytes long.
    #[error("invalid key length {len} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength {
        /// Length supplied by the caller.
        len: usize,
    },
    /// Block width is not 128, 192 or 256 bits.
    #[error("invalid block width {bits} bits (expected 128, 192 or 256)")]
    InvalidBlockBits {
        /// Width supplied by the caller.
        bits: usize,
    },
    /// A buffer handed to a block operation has the wrong size.
    #[error("block length mismatch: expected {expected} bytes, got {actual}")]
    BlockLength {
        /// Bytes required by the configured block width.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },
}

/// Result alias for the cipher core.
pub type Result<T> = core::result::Result<T, Error>;
