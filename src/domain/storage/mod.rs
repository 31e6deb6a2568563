//! Storage domain - asynchronous key-value adapter contract

mod adapter;

pub use adapter::{KeyValueStore, KeyValueStoreExt};

#[cfg(test)]
pub use adapter::mock::MockKeyValueStore;
