//! Cache Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Sweep Handle ==
/// Owner of a running sweep task.
///
/// Call [`SweepHandle::shutdown`] to stop the loop and wait for it to exit.
/// Dropping the handle also stops the loop, at its next wakeup.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            debug!("Sweep task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Runs one sweep pass and returns the number of entries removed.
pub async fn sweep_once(cache: &RwLock<CacheStore>) -> usize {
    let removed = cache.write().await.sweep();

    if removed > 0 {
        info!("Cache sweep: removed {} expired entries", removed);
    } else {
        debug!("Cache sweep: no expired entries found");
    }
    removed
}

/// Spawns a background task that sweeps the cache every `interval`.
///
/// The first pass runs one full interval after spawning, not immediately.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(1800))));
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweep_task(cache: Arc<RwLock<CacheStore>>, interval: Duration) -> SweepHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // first tick completes immediately

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    sweep_once(&cache).await;
                }
                changed = shutdown_rx.changed() => {
                    // Sender dropped or shutdown requested
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Cache sweep task stopping");
                        break;
                    }
                }
            }
        }
    });

    SweepHandle { shutdown_tx, task }
}
