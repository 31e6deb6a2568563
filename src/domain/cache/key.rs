//! Storage-key derivation strategies

use std::fmt::Debug;

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest. Collisions inside one
/// prefix namespace are an accepted risk at this length.
const SHORT_HASH_LEN: usize = 8;

/// Trait for deriving the physical storage key for a logical key
pub trait StorageKeyGenerator: Send + Sync + Debug {
    /// Derives the storage key for a logical key under the given prefix.
    fn derive(&self, prefix: &str, logical_key: &str) -> String;
}

/// Default generator: prefix + truncated SHA-256 of the logical key.
///
/// Logical keys are hashed as-is; no normalization (case, trailing slash)
/// is applied here.
#[derive(Debug, Clone, Default)]
pub struct HashedKeyGenerator;

impl HashedKeyGenerator {
    pub fn new() -> Self {
        Self
    }

    fn short_hash(input: &str) -> String {
        let digest = Sha256::digest(input.as_bytes());
        hex::encode(digest)[..SHORT_HASH_LEN].to_string()
    }
}

impl StorageKeyGenerator for HashedKeyGenerator {
    fn derive(&self, prefix: &str, logical_key: &str) -> String {
        format!("{}_{}", prefix, Self::short_hash(logical_key))
    }
}
