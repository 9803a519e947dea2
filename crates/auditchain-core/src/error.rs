//! Error types for the audit chain core.

use thiserror::Error;

/// Core errors that can occur while constructing or parsing primitives.
///
/// Note that lookup misses and failed verifications are *values*
/// (`ProofStatus::NotFound`, a `false` verification result), not errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash length: expected 32 bytes, got {0}")]
    InvalidHashLength(usize),
}
