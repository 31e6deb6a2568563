//! pagebrief
//!
//! Cache and session core for a browser side-panel page summarizer:
//! - Generic TTL cache over an asynchronous key-value adapter, with
//!   per-namespace index bookkeeping and pluggable codecs
//! - Typed facades for summaries, narration audio and conversations
//! - Per-tab session controller that reconciles long-running fetches
//!   against the live tab URL and discards stale results
//! - Periodic expiry sweeper
//!
//! UI rendering, DOM extraction, credential storage and the HTTP endpoints
//! are external collaborators, consumed through the contracts in
//! [`domain`].

pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

pub use config::AppConfig;
use domain::DomainError;
use domain::storage::KeyValueStore;
use infrastructure::{CacheSet, CacheSweeper};

/// Builds the cache set and its sweeper from configuration.
///
/// The sweeper is returned unstarted; call [`CacheSweeper::spawn`] once the
/// runtime is up.
pub fn build_caches(
    store: Arc<dyn KeyValueStore>,
    config: &AppConfig,
) -> Result<(CacheSet, CacheSweeper), DomainError> {
    let caches = CacheSet::from_config(store, &config.cache)?;
    let sweeper = CacheSweeper::new(caches.sweep_targets(), config.sweeper.interval());
    Ok((caches, sweeper))
}
