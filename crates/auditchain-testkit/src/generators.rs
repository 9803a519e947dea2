//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use auditchain_core::{Blake3Hash, Entry, EntryId};

/// Generate a random Blake3Hash.
pub fn blake3_hash() -> impl Strategy<Value = Blake3Hash> {
    any::<[u8; 32]>().prop_map(Blake3Hash::from_bytes)
}

/// Generate a random EntryId.
pub fn entry_id() -> impl Strategy<Value = EntryId> {
    any::<[u8; 32]>().prop_map(EntryId::from_bytes)
}

/// Generate an event kind string.
pub fn entry_kind() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,31}".prop_map(String::from)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a metadata map with up to `max_keys` entries.
pub fn metadata(max_keys: usize) -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(
        "[a-z][a-z0-9_]{0,15}",
        "[ -~]{0,32}",
        0..=max_keys,
    )
}

/// Generate a reasonable timestamp (Unix milliseconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=1_900_000_000_000i64
}

/// Generate a non-empty sequence of leaf hashes.
pub fn leaf_hashes(max_len: usize) -> impl Strategy<Value = Vec<Blake3Hash>> {
    prop::collection::vec(blake3_hash(), 1..=max_len)
}

/// Parameters for generating an entry.
#[derive(Debug, Clone)]
pub struct EntryParams {
    pub kind: String,
    pub payload: Vec<u8>,
    pub metadata: BTreeMap<String, String>,
    pub created_at: i64,
}

impl Arbitrary for EntryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (entry_kind(), payload(256), metadata(4), timestamp())
            .prop_map(|(kind, payload, metadata, created_at)| EntryParams {
                kind,
                payload,
                metadata,
                created_at,
            })
            .boxed()
    }
}

/// Construct an entry from parameters.
pub fn entry_from_params(params: &EntryParams) -> Entry {
    Entry::new(
        params.kind.clone(),
        params.payload.clone(),
        params.metadata.clone(),
        params.created_at,
    )
}
