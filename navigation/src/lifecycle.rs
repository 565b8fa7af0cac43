use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{GraphSnapshot, GraphSource, GraphStore, SourceError};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use wayfind_core::error::{ErrorCode, WayfindError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("graph source error: {0}")]
    Source(#[from] SourceError),
}

impl WayfindError for LifecycleError {
    fn error_code(&self) -> ErrorCode {
        match self {
            LifecycleError::Source(SourceError::Parse(_)) => ErrorCode::Internal,
            LifecycleError::Source(_) => ErrorCode::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadSummary {
    pub snapshot_id: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub dropped_edges: usize,
}

impl ReloadSummary {
    fn of(snapshot: &GraphSnapshot) -> Self {
        Self {
            snapshot_id: snapshot.snapshot_id(),
            node_count: snapshot.node_count(),
            edge_count: snapshot.edge_count(),
            dropped_edges: snapshot.dropped_edges(),
        }
    }
}

/// Loads the graph from its source at startup and on demand.
///
/// Every build is a full replace. If fetching fails the store is left as it
/// was, so routing keeps running on the last good graph.
pub struct GraphLifecycle {
    source: Arc<dyn GraphSource>,
    store: GraphStore,
    rebuild_lock: Mutex<()>,
}

impl GraphLifecycle {
    pub fn new(source: Arc<dyn GraphSource>) -> Self {
        Self {
            source,
            store: GraphStore::new(),
            rebuild_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Initial load, run once at startup.
    pub async fn build(&self) -> Result<ReloadSummary, LifecycleError> {
        info!("Building navigation graph");
        self.rebuild().await
    }

    /// Rebuild after the underlying records changed.
    pub async fn reload(&self) -> Result<ReloadSummary, LifecycleError> {
        info!("Reloading navigation graph");
        self.rebuild().await
    }

    async fn rebuild(&self) -> Result<ReloadSummary, LifecycleError> {
        // One rebuild at a time so snapshots are published in fetch order.
        let _guard = self.rebuild_lock.lock().await;

        let (nodes, edges) = match self.source.fetch_graph().await {
            Ok(records) => records,
            Err(err) => {
                let kept = self.store.current();
                warn!(
                    "Graph rebuild aborted, keeping {}: {}",
                    kept.snapshot_id(),
                    err
                );
                return Err(err.into());
            }
        };

        let snapshot = self.store.replace(nodes, edges);
        Ok(ReloadSummary::of(&snapshot))
    }
}
