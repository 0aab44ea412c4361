//! Background vacuum task management

use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::types::{Store, VacuumTask};

/// Start the background vacuum task
pub fn start_vacuum_task(store: &Store) {
    let cleanup_interval = store.inner.cleanup_interval;

    // Don't start the task if interval is zero (useful for tests)
    if cleanup_interval.is_zero() {
        return;
    }

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    // Weak so the loop alone never keeps the store alive
    let weak = Arc::downgrade(&store.inner);
    let root = store.inner.root.clone();

    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + cleanup_interval, cleanup_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(
            root = %root.display(),
            interval_secs = cleanup_interval.as_secs(),
            "Cache vacuum started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                // Fires on shutdown and when the store is dropped
                _ = shutdown_rx.changed() => break,
            }

            let Some(inner) = weak.upgrade() else {
                break;
            };
            Store::sweep(&inner, Some(&shutdown_rx)).await;
        }

        tracing::debug!(root = %root.display(), "Cache vacuum stopped");
    });

    *store.inner.vacuum.lock() = Some(VacuumTask {
        shutdown: shutdown_tx,
        handle,
    });
}

impl Store {
    /// Stop the background vacuum and wait for it to exit.
    ///
    /// A sweep in progress stops after the file it is working on. Reads and
    /// writes keep working; only the periodic cleanup ends. Idempotent.
    pub async fn shutdown(&self) {
        let task = self.inner.vacuum.lock().take();
        if let Some(task) = task {
            let _ = task.shutdown.send(true);
            match task.handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => tracing::warn!("Cache vacuum task failed: {}", e),
            }
        }
    }
}
