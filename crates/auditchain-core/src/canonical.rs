//! Canonical CBOR encoding for deterministic entry serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 milliseconds)
//!
//! The canonical encoding is critical: it ensures that the same entry
//! produces identical bytes (and thus an identical leaf hash and entry
//! id) across all platforms. Tree construction and any downstream
//! verifier reconstructing leaf bytes from raw entry data must go
//! through this module.

use bytes::Bytes;
use ciborium::value::Value;
use std::collections::BTreeMap;

/// Entry field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const KIND: u64 = 0;
    pub const PAYLOAD: u64 = 1;
    pub const METADATA: u64 = 2;
    pub const CREATED_AT: u64 = 3;
}

/// Encode an entry's fields to canonical CBOR bytes.
///
/// The entry id is *not* part of the encoding; it is the Blake3 hash of
/// these bytes and is derived from them.
pub fn entry_bytes(
    kind: &str,
    payload: &Bytes,
    metadata: &BTreeMap<String, String>,
    created_at: i64,
) -> Vec<u8> {
    let value = entry_to_cbor_value(kind, payload, metadata, created_at);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Convert entry fields to a CBOR Value (map with integer keys).
fn entry_to_cbor_value(
    kind: &str,
    payload: &Bytes,
    metadata: &BTreeMap<String, String>,
    created_at: i64,
) -> Value {
    // Build map entries in key order (already sorted 0-3)
    let mut entries = Vec::with_capacity(4);

    entries.push((
        Value::Integer(keys::KIND.into()),
        Value::Text(kind.to_string()),
    ));

    entries.push((
        Value::Integer(keys::PAYLOAD.into()),
        Value::Bytes(payload.to_vec()),
    ));

    // Metadata is a nested map with text keys; encode_map_canonical
    // re-sorts by encoded bytes, so BTreeMap iteration order is only a
    // starting point.
    let meta_entries: Vec<(Value, Value)> = metadata
        .iter()
        .map(|(k, v)| (Value::Text(k.clone()), Value::Text(v.clone())))
        .collect();
    entries.push((Value::Integer(keys::METADATA.into()), Value::Map(meta_entries)));

    entries.push((
        Value::Integer(keys::CREATED_AT.into()),
        Value::Integer(created_at.into()),
    ));

    Value::Map(entries)
}

/// Recursively encode a CBOR value.
///
/// Only the value types that can appear in an entry are supported.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            encode_integer(buf, *i);
        }
        Value::Bytes(b) => {
            encode_bytes(buf, b);
        }
        Value::Text(s) => {
            encode_text(buf, s);
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries);
        }
        _ => {
            unreachable!("unsupported CBOR value type in entry encoding");
        }
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: negative integer
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    // Encode all keys first to sort by encoded bytes
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    // Sort by encoded key bytes (lexicographic)
    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    // Write map header
    encode_uint(buf, 5, key_value_pairs.len() as u64);

    // Write sorted key-value pairs
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
