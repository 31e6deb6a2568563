//! Infrastructure layer - concrete implementations and wiring

pub mod cache;
pub mod logging;
pub mod services;
pub mod storage;

pub use cache::{AudioCache, CacheSet, ConversationCache, SummaryCache};
pub use services::{CacheSweeper, SessionDeps, SessionService};
pub use storage::InMemoryKeyValueStore;
