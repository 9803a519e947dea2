//! # AuditChain
//!
//! A batched, Merkle-proof-verified audit log.
//!
//! ## Overview
//!
//! Entries are appended to a pending buffer; every `batch_size`
//! entries the buffer is sealed into an immutable batch with a Merkle
//! tree over the entries' canonical bytes. Any caller can then prove,
//! without replaying the whole log, that a specific entry existed
//! unaltered in a specific batch.
//!
//! ## Key Concepts
//!
//! - **Entry**: Immutable, content-addressed. Never edited or deleted.
//! - **Batch**: A sealed group of entries plus its tree. Never mutated.
//! - **Proof bundle**: Leaf bytes, sibling path, and root; enough to
//!   verify one entry independently.
//! - **Pending buffer**: Entries awaiting their seal. Not yet provable.
//!
//! ## Usage
//!
//! ```rust
//! use auditchain::{AuditChain, ProofStatus};
//! use std::collections::BTreeMap;
//!
//! let chain = AuditChain::new(4).unwrap();
//!
//! let mut meta = BTreeMap::new();
//! meta.insert("source".to_string(), "example".to_string());
//!
//! let id = chain.add("config_change", &b"max_conns=64"[..], meta);
//!
//! // The entry is pending until its batch seals.
//! assert!(matches!(chain.get_proof(&id), ProofStatus::Pending { .. }));
//!
//! chain.flush();
//! if let ProofStatus::Sealed(bundle) = chain.get_proof(&id) {
//!     assert!(chain.verify(&id, &bundle));
//! }
//! ```
//!
//! ## Re-exports
//!
//! Core primitives (`Entry`, `EntryId`, `MerkleTree`, `verify_proof`)
//! are re-exported from [`auditchain_core`].

pub mod chain;
pub mod error;
pub mod snapshot;

pub use chain::{AuditChain, Batch, ProofBundle, ProofStatus, DEFAULT_BATCH_SIZE};
pub use error::{ChainError, Result};
pub use snapshot::{BatchRecord, ChainSummary, Snapshot};

// Re-export commonly used core types
pub use auditchain_core::{
    entry_bytes, verify_proof, Blake3Hash, CoreError, Entry, EntryId, MerkleTree, ProofStep, Side,
};
