//! Hashing primitives for the audit chain.
//!
//! Wraps Blake3 with a strong type. The same digest is used for leaf
//! hashes and internal tree nodes; internal nodes are computed over the
//! concatenation of the two child digests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Hash the concatenation of two digests (`left || right`).
    ///
    /// This is the node-combining function for Merkle trees; the builder
    /// and the proof verifier must both go through it.
    pub fn combine(left: &Self, right: &Self) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&left.0);
        hasher.update(&right.0);
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
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
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidHashLength(bytes.len()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero hash (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake3Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Blake3Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"test data";
        let h1 = Blake3Hash::hash(data);
        let h2 = Blake3Hash::hash(data);
        assert_eq!(h1, h2);

        let h3 = Blake3Hash::hash(b"different data");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_combine_matches_concatenation() {
        let left = Blake3Hash::hash(b"left");
        let right = Blake3Hash::hash(b"right");

        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&left.0);
        concat.extend_from_slice(&right.0);

        assert_eq!(Blake3Hash::combine(&left, &right), Blake3Hash::hash(&concat));
    }

    #[test]
    fn test_combine_order_matters() {
        let a = Blake3Hash::hash(b"a");
        let b = Blake3Hash::hash(b"b");
        assert_ne!(Blake3Hash::combine(&a, &b), Blake3Hash::combine(&b, &a));
    }

    #[test]
    fn test_hex_roundtrip() {
        let h = Blake3Hash::hash(b"roundtrip");
        let recovered = Blake3Hash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, recovered);
    }

    #[test]
    fn test_from_hex_rejects_bad_length() {
        assert!(Blake3Hash::from_hex("abcd").is_err());
        assert!(Blake3Hash::from_hex("not hex at all").is_err());
    }
}
