//! The batched audit log.
//!
//! Entries accumulate in a pending buffer; once the buffer reaches the
//! batch size it is sealed into an immutable [`Batch`] with a Merkle
//! tree over the entries' canonical bytes. Proofs exist only for
//! sealed entries.
//!
//! All mutating operations (`add`, `flush`, `export`) run under one
//! write lock, so an `add` and the seal it may trigger are a single
//! atomic step. Read operations take the read lock and see a
//! consistent pending buffer; sealed batches never change after
//! creation.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use auditchain_core::{verify_proof, Blake3Hash, Entry, EntryId, MerkleTree, ProofStep};

use crate::error::{ChainError, Result};
use crate::snapshot::{BatchRecord, ChainSummary, Snapshot};

/// Default number of entries per batch, matching the original deployment.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A sealed group of entries and the tree built over them.
///
/// Immutable after sealing; the entry order is the order the entries
/// were appended to the pending buffer.
#[derive(Debug, Clone)]
pub struct Batch {
    tree: MerkleTree,
    entries: Vec<Entry>,
    sealed_at: i64,
}

impl Batch {
    /// The batch's root hash.
    pub fn root(&self) -> Blake3Hash {
        self.tree.root()
    }

    /// When the batch was sealed (Unix milliseconds).
    pub fn sealed_at(&self) -> i64 {
        self.sealed_at
    }

    /// The sealed entries, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn position_of(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }
}

/// Everything a caller needs to prove one sealed entry existed
/// unaltered in its batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// The entry being proven.
    pub entry_id: EntryId,
    /// Canonical bytes of the entry (the Merkle leaf).
    pub leaf_bytes: Bytes,
    /// Sibling path up to the root.
    pub proof: Vec<ProofStep>,
    /// Root of the batch the entry was sealed into.
    pub root: Blake3Hash,
    /// Seal time of that batch (Unix milliseconds).
    pub sealed_at: i64,
}

/// Outcome of a proof lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofStatus {
    /// The entry is sealed; here is its proof.
    Sealed(ProofBundle),
    /// The entry exists but its batch has not been sealed yet, so no
    /// proof exists. `position` is its index in the pending buffer.
    Pending { position: usize },
    /// No entry with this id.
    NotFound,
}

struct ChainInner {
    /// Every entry ever added, in ingestion order.
    all: Vec<Entry>,
    /// Sealed batches, oldest first.
    batches: Vec<Batch>,
    /// Entries awaiting their batch seal.
    pending: Vec<Entry>,
}

/// The batched, Merkle-proof-verified audit log.
///
/// Append-only: entries are never edited or deleted. One instance is
/// one logical writer; share it behind an `Arc` if multiple tasks need
/// access.
pub struct AuditChain {
    batch_size: usize,
    inner: RwLock<ChainInner>,
}

impl AuditChain {
    /// Create a chain that seals every `batch_size` entries.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(ChainError::InvalidBatchSize(batch_size));
        }

        Ok(Self {
            batch_size,
            inner: RwLock::new(ChainInner {
                all: Vec::new(),
                batches: Vec::new(),
                pending: Vec::new(),
            }),
        })
    }

    /// The configured batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Add an entry to the log.
    ///
    /// The entry lands in the pending buffer; if that fills the buffer
    /// to the batch size, the batch is sealed in the same critical
    /// section. Returns the content-addressed entry id.
    pub fn add(
        &self,
        kind: impl Into<String>,
        payload: impl Into<Bytes>,
        metadata: BTreeMap<String, String>,
    ) -> EntryId {
        let entry = Entry::new(kind, payload, metadata, now_millis());
        let id = entry.id;

        let mut inner = self.inner.write().unwrap();
        inner.all.push(entry.clone());
        inner.pending.push(entry);
        debug!(entry_id = %id, pending = inner.pending.len(), "entry added");

        if inner.pending.len() >= self.batch_size {
            seal_locked(&mut inner);
        }

        id
    }

    /// Seal the pending buffer now, without waiting for the threshold.
    ///
    /// Returns the new batch's root, or `None` if there was nothing to
    /// seal (an empty flush is a no-op, not an error).
    pub fn flush(&self) -> Option<Blake3Hash> {
        let mut inner = self.inner.write().unwrap();
        seal_locked(&mut inner)
    }

    /// Look up the proof for an entry.
    ///
    /// Sealed batches are searched newest-first; entries still in the
    /// pending buffer are reported as [`ProofStatus::Pending`] since a
    /// pending entry is, by definition, not yet provable. Unknown ids
    /// yield [`ProofStatus::NotFound`], never an error.
    pub fn get_proof(&self, id: &EntryId) -> ProofStatus {
        let inner = self.inner.read().unwrap();

        for batch in inner.batches.iter().rev() {
            if let Some(index) = batch.position_of(id) {
                let entry = &batch.entries[index];
                return ProofStatus::Sealed(ProofBundle {
                    entry_id: *id,
                    leaf_bytes: Bytes::from(entry.canonical_bytes()),
                    proof: batch.tree.proof(index),
                    root: batch.root(),
                    sealed_at: batch.sealed_at,
                });
            }
        }

        if let Some(position) = inner.pending.iter().position(|e| e.id == *id) {
            return ProofStatus::Pending { position };
        }

        ProofStatus::NotFound
    }

    /// Verify a proof bundle against this chain's sealed batches.
    ///
    /// Total: returns `false` for unknown roots, id mismatches, and
    /// structurally invalid proofs (wrong step count for the batch's
    /// tree), never panics. The leaf bytes must hash to the claimed
    /// entry id, so a bundle cannot smuggle one entry's leaf under
    /// another entry's id.
    pub fn verify(&self, id: &EntryId, bundle: &ProofBundle) -> bool {
        if bundle.entry_id != *id {
            return false;
        }

        // id = Blake3(canonical bytes) by construction
        if Blake3Hash::hash(&bundle.leaf_bytes).0 != id.0 {
            return false;
        }

        let inner = self.inner.read().unwrap();
        let Some(batch) = inner.batches.iter().rev().find(|b| b.root() == bundle.root) else {
            return false;
        };

        if bundle.proof.len() != batch.tree.proof_len() {
            return false;
        }

        verify_proof(&bundle.leaf_bytes, &bundle.proof, &bundle.root)
    }

    /// Export the full chain for archival or external anchoring.
    ///
    /// Forces a seal of any non-empty pending buffer first, so every
    /// exported entry belongs to a sealed batch. Idempotent with
    /// respect to already-sealed batches.
    pub fn export(&self) -> Snapshot {
        let mut inner = self.inner.write().unwrap();
        seal_locked(&mut inner);

        Snapshot {
            entries: inner.all.clone(),
            batches: inner.batches.iter().map(batch_record).collect(),
            exported_at: now_millis(),
        }
    }

    /// A point-in-time summary for status and monitoring callers.
    pub fn summary(&self) -> ChainSummary {
        let inner = self.inner.read().unwrap();

        ChainSummary {
            total_entries: inner.all.len(),
            sealed_batches: inner.batches.len(),
            pending_entries: inner.pending.len(),
            roots: inner.batches.iter().map(Batch::root).collect(),
            oldest_entry_at: inner.all.first().map(|e| e.created_at),
            newest_entry_at: inner.all.last().map(|e| e.created_at),
        }
    }
}

impl Default for AuditChain {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE).expect("default batch size is positive")
    }
}

/// The one seal transition. Callers must hold the write lock.
///
/// A seal of an empty buffer is a no-op. Otherwise the pending entries
/// become a batch, in insertion order, with a tree over their leaf
/// hashes.
fn seal_locked(inner: &mut ChainInner) -> Option<Blake3Hash> {
    if inner.pending.is_empty() {
        return None;
    }

    let entries = std::mem::take(&mut inner.pending);
    let tree = MerkleTree::build(entries.iter().map(Entry::leaf_hash).collect());
    let root = tree.root();

    info!(
        root = %root.to_hex(),
        entries = entries.len(),
        "batch sealed"
    );

    inner.batches.push(Batch {
        tree,
        entries,
        sealed_at: now_millis(),
    });

    Some(root)
}

fn batch_record(batch: &Batch) -> BatchRecord {
    BatchRecord {
        root: batch.root(),
        sealed_at: batch.sealed_at,
        entry_count: batch.entries.len(),
    }
}

/// Current wall clock in Unix milliseconds.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
