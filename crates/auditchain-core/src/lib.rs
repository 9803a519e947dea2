//! # AuditChain Core
//!
//! Pure primitives for the batched Merkle audit log: entries,
//! canonicalization, tree construction, and proof verification.
//!
//! This crate contains no I/O, no locking, no clocks. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Entry`] - An immutable audit record
//! - [`EntryId`] - Content-addressed identifier (Blake3 hash)
//! - [`MerkleTree`] - Layered-array Merkle tree over canonical entry bytes
//! - [`ProofStep`] - One (sibling, side) element of a proof path
//!
//! ## Canonicalization
//!
//! All entries are encoded using deterministic CBOR before hashing.
//! See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod entry;
pub mod error;
pub mod merkle;

pub use canonical::entry_bytes;
pub use crypto::Blake3Hash;
pub use entry::{Entry, EntryId};
pub use error::CoreError;
pub use merkle::{verify_proof, MerkleTree, ProofStep, Side};
