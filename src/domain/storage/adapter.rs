//! Key-value storage adapter contract

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

/// Asynchronous key-value store keyed by string.
///
/// Each call is atomic on its own; there is no multi-key transaction.
/// Callers that perform paired writes (e.g. an index entry and a blob) must
/// tolerate partial state on their read paths.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Fetches the given keys. Keys with no stored value are simply absent
    /// from the returned map.
    async fn get(&self, keys: &[String]) -> Result<HashMap<String, Value>, DomainError>;

    /// Stores every entry in the map, overwriting existing values.
    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), DomainError>;

    /// Removes the given keys. Removing an absent key is not an error.
    async fn remove(&self, keys: &[String]) -> Result<(), DomainError>;
}

/// Convenience helpers over the multi-key surface
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Fetches a single key.
    async fn get_one(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let mut map = self.get(std::slice::from_ref(&key.to_string())).await?;
        Ok(map.remove(key))
    }

    /// Stores a single entry.
    async fn set_one(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.set(HashMap::from([(key.to_string(), value)])).await
    }

    /// Removes a single key.
    async fn remove_one(&self, key: &str) -> Result<(), DomainError> {
        self.remove(std::slice::from_ref(&key.to_string())).await
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}
