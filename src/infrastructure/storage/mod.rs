//! Storage infrastructure - key-value adapter implementations

mod in_memory;

pub use in_memory::InMemoryKeyValueStore;
