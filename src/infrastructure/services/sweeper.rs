//! Periodic cache expiry sweeper
//!
//! One process-wide task that runs every cache's expiry sweep once at
//! startup and then on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::cache::ExpirySweep;

#[derive(Debug)]
pub struct CacheSweeper {
    caches: Vec<Arc<dyn ExpirySweep>>,
    interval: Duration,
}

impl CacheSweeper {
    pub fn new(caches: Vec<Arc<dyn ExpirySweep>>, interval: Duration) -> Self {
        Self { caches, interval }
    }

    /// Sweeps every cache once. Returns the total number of removed entries.
    pub async fn run_once(&self) -> usize {
        let sweeps = self.caches.iter().map(|cache| {
            let cache = cache.clone();
            async move {
                let removed = cache.clear_expired().await;
                if removed > 0 {
                    tracing::debug!(
                        "sweeper: removed {} expired entries from '{}'",
                        removed,
                        cache.namespace()
                    );
                }
                removed
            }
        });

        join_all(sweeps).await.into_iter().sum()
    }

    /// Runs an immediate sweep, then one per interval, on a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // First tick fires immediately: the startup sweep.
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }
}
