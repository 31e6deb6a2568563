//! Per-namespace cache index
//!
//! The index is the sole source of truth for existence and freshness of a
//! logical key; blobs are never consulted for either. It lives under a single
//! well-known storage key (the cache namespace) as one JSON object mapping
//! logical key to entry metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Current index record layout. Entries written under any other version are
/// treated as expired rather than deserialized.
pub const SCHEMA_VERSION: u32 = 1;

/// Metadata for one cached logical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Creation time, epoch milliseconds. Missing or non-positive values
    /// read as already expired.
    #[serde(default)]
    pub timestamp_ms: i64,
    /// Byte length of the encoded blob, recorded at write time.
    #[serde(default)]
    pub size_bytes: u64,
    /// Layout version of this record. Absent on records written before
    /// versioning existed, which deserializes to 0 and expires them.
    #[serde(default)]
    pub schema_version: u32,
}

impl IndexEntry {
    pub fn new(timestamp_ms: i64, size_bytes: u64) -> Self {
        Self {
            timestamp_ms,
            size_bytes,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Whether this entry is expired at `now_ms` for the given TTL.
    /// Corrupt timestamps and foreign schema versions count as expired,
    /// never as errors.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        if self.schema_version != SCHEMA_VERSION {
            return true;
        }
        if self.timestamp_ms <= 0 {
            return true;
        }
        now_ms - self.timestamp_ms > ttl_ms
    }
}

/// Index contents: logical key -> entry metadata
pub type CacheIndex = HashMap<String, IndexEntry>;
