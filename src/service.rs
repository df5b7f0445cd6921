use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::reconciler::{Outcome, Reconciler};
use crate::watcher::FileChangeEvent;

/// Counters reported when the service stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub written: usize,
    pub unchanged: usize,
    pub conflicts: usize,
    pub failures: usize,
}

/// Feeds change events to the reconciler, one run per burst of events.
pub struct WatchService {
    reconciler: Arc<Reconciler>,
    debounce: Duration,
    generations: Arc<Mutex<HashMap<PathBuf, u64>>>,
    stats: Arc<Mutex<ServiceStats>>,
}

impl WatchService {
    pub fn new(reconciler: Arc<Reconciler>, debounce: Duration) -> Self {
        Self {
            reconciler,
            debounce,
            generations: Arc::new(Mutex::new(HashMap::new())),
            stats: Arc::new(Mutex::new(ServiceStats::default())),
        }
    }

    /// Runs until `shutdown` resolves or the event channel closes, then waits
    /// for in-flight reconciliations.
    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<FileChangeEvent>,
        shutdown: impl Future<Output = ()>,
    ) -> ServiceStats {
        info!("Watch service started (debounce: {:?})", self.debounce);

        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        debug!("Event channel closed");
                        break;
                    };
                    self.schedule(&mut tasks, event);
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        warn!("Reconciliation task failed: {}", e);
                    }
                }
            }
        }

        if !tasks.is_empty() {
            info!("Waiting for {} pending reconciliation(s)", tasks.len());
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!("Reconciliation task failed: {}", e);
            }
        }

        let stats = *self.stats.lock().expect("stats lock poisoned");
        info!(
            written = stats.written,
            unchanged = stats.unchanged,
            conflicts = stats.conflicts,
            failures = stats.failures,
            "Watch service stopped"
        );
        stats
    }

    /// Starts a delayed run that only proceeds if no newer event arrived for the path.
    fn schedule(&self, tasks: &mut JoinSet<()>, event: FileChangeEvent) {
        let generation = {
            let mut generations = self.generations.lock().expect("generations lock poisoned");
            let counter = generations.entry(event.path.clone()).or_insert(0);
            *counter += 1;
            *counter
        };

        let reconciler = Arc::clone(&self.reconciler);
        let generations = Arc::clone(&self.generations);
        let stats = Arc::clone(&self.stats);
        let debounce = self.debounce;

        tasks.spawn(async move {
            tokio::time::sleep(debounce).await;

            {
                let mut generations = generations.lock().expect("generations lock poisoned");
                if generations.get(&event.path) != Some(&generation) {
                    return;
                }
                generations.remove(&event.path);
            }

            let result = reconciler.reconcile(&event).await;
            let mut stats = stats.lock().expect("stats lock poisoned");
            match result {
                Ok(Outcome::Written { .. }) => stats.written += 1,
                Ok(Outcome::Unchanged) => stats.unchanged += 1,
                Ok(Outcome::Conflict) => stats.conflicts += 1,
                Ok(_) => {}
                Err(e) => {
                    stats.failures += 1;
                    warn!(path = %event.path.display(), "Failed to annotate note: {}", e);
                }
            }
        });
    }
}
