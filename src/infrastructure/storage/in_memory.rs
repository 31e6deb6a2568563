//! In-memory key-value store
//!
//! Stand-in for the host's persistent extension storage. Each trait call
//! takes the lock once, matching the adapter's per-call atomicity contract.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::storage::KeyValueStore;

#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (index records and blobs alike).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, keys: &[String]) -> Result<HashMap<String, Value>, DomainError> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    async fn set(&self, new: HashMap<String, Value>) -> Result<(), DomainError> {
        self.entries.write().await.extend(new);
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::KeyValueStoreExt;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();

        store.set_one("a", json!({"n": 1})).await.unwrap();
        store.set_one("b", json!("two")).await.unwrap();
        assert_eq!(store.len().await, 2);

        let map = store.get(&["a".to_string(), "b".to_string()]).await.unwrap();
        assert_eq!(map["a"], json!({"n": 1}));
        assert_eq!(map["b"], json!("two"));

        store.remove(&["a".to_string(), "b".to_string()]).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let store = InMemoryKeyValueStore::new();

        store.set_one("k", json!(1)).await.unwrap();
        store.set_one("k", json!(2)).await.unwrap();

        assert_eq!(store.get_one("k").await.unwrap(), Some(json!(2)));
        assert_eq!(store.len().await, 1);
    }
}
