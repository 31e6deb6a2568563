//! Cache infrastructure - typed facades over the generic TTL cache

mod facades;

pub use facades::{AudioCache, CacheSet, ConversationCache, SummaryCache};
