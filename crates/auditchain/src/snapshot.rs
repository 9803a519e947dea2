//! Export and status views of the chain.
//!
//! [`Snapshot`] is the hand-off point to external anchoring or
//! mirroring systems; the chain itself never calls out to them.

use serde::{Deserialize, Serialize};

use auditchain_core::{Blake3Hash, Entry};

/// A sealed batch as it appears in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Root hash of the batch's Merkle tree.
    pub root: Blake3Hash,
    /// Seal time (Unix milliseconds).
    pub sealed_at: i64,
    /// Number of entries sealed in the batch.
    pub entry_count: usize,
}

/// A full export of the chain for archival.
///
/// Produced by `AuditChain::export`, which seals the pending buffer
/// first, so every entry here belongs to some batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every entry ever added, in ingestion order.
    pub entries: Vec<Entry>,
    /// Sealed batches, oldest first.
    pub batches: Vec<BatchRecord>,
    /// When the export was taken (Unix milliseconds).
    pub exported_at: i64,
}

/// Point-in-time counters for status and monitoring callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    /// Entries added over the chain's lifetime (sealed + pending).
    pub total_entries: usize,
    /// Number of sealed batches.
    pub sealed_batches: usize,
    /// Entries still awaiting a seal.
    pub pending_entries: usize,
    /// Root hashes of all sealed batches, oldest first.
    pub roots: Vec<Blake3Hash>,
    /// Creation time of the first entry, if any.
    pub oldest_entry_at: Option<i64>,
    /// Creation time of the latest entry, if any.
    pub newest_entry_at: Option<i64>,
}
