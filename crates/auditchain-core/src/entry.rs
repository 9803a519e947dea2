//! Entry: the atomic unit of the audit log.
//!
//! An entry is immutable once created. There is no edit or delete API;
//! the log only ever grows.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::canonical::entry_bytes;
use crate::crypto::Blake3Hash;
use crate::error::CoreError;

/// A 32-byte entry identifier, computed as Blake3(canonical entry bytes).
///
/// This is the content-address of an entry. Two entries with the same
/// kind, payload, metadata, and timestamp will have the same EntryId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub [u8; 32]);

impl EntryId {
    /// Create a new EntryId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        Ok(Self(Blake3Hash::from_hex(s)?.0))
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for EntryId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for EntryId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An immutable audit log entry.
///
/// Construct via [`Entry::new`], which canonicalizes the fields and
/// computes the content-addressed id. Fields are read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Content-addressed identifier.
    pub id: EntryId,

    /// Event kind, chosen by the producer (e.g. "config_change").
    pub kind: String,

    /// Opaque payload bytes.
    pub payload: Bytes,

    /// Producer-supplied metadata.
    pub metadata: BTreeMap<String, String>,

    /// Creation timestamp (Unix milliseconds).
    pub created_at: i64,
}

impl Entry {
    /// Create a new entry, computing its id from the canonical encoding.
    pub fn new(
        kind: impl Into<String>,
        payload: impl Into<Bytes>,
        metadata: BTreeMap<String, String>,
        created_at: i64,
    ) -> Self {
        let kind = kind.into();
        let payload = payload.into();
        let bytes = entry_bytes(&kind, &payload, &metadata, created_at);
        let id = EntryId(Blake3Hash::hash(&bytes).0);

        Self {
            id,
            kind,
            payload,
            metadata,
            created_at,
        }
    }

    /// The canonical byte encoding of this entry.
    ///
    /// These are the leaf bytes fed to the Merkle tree: the leaf hash is
    /// `Blake3Hash::hash(canonical_bytes())`.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        entry_bytes(&self.kind, &self.payload, &self.metadata, self.created_at)
    }

    /// The leaf hash of this entry.
    pub fn leaf_hash(&self) -> Blake3Hash {
        Blake3Hash::hash(&self.canonical_bytes())
    }
}
