//! Error types for the audit chain.

use thiserror::Error;

/// Errors that can occur during chain operations.
///
/// Lookup misses (`ProofStatus::NotFound`) and failed verifications
/// (a `false` result) are values, not errors; this enum covers
/// construction-time contract violations only.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Batch size must be at least 1.
    #[error("invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
