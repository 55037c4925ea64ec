//! Canonical serialization and hashing for replay verification.
//!
//! Two hashes are derived here:
//!
//! - a **canonical fingerprint** (xxh64 over canonical JSON bytes) used to
//!   assert that two runs over the same inputs produced the identical
//!   report, and
//! - a **question hash** (SHA-256 over the normalized question text) that
//!   pins an exported snapshot to the question it was derived from.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap in hashed data: report types are structs and vectors

use serde::Serialize;
use sha2::{Digest, Sha256};
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("canonical serialization failed")
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute the canonical hash and return it as a hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

/// Normalize question text for hashing: CRLF and CR become LF, leading
/// and trailing whitespace is trimmed.
pub fn normalize_question(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// SHA-256 of the normalized question text, as lowercase hex.
pub fn question_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_question(text).as_bytes());
    hex::encode(hasher.finalize())
}
