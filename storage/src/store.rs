use crate::snapshot::GraphSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};
use wayfind_core::model::{GraphEdge, GraphNode};

/// Owner of the single active graph snapshot.
///
/// Readers take a cheap `Arc` clone and keep using it for as long as they
/// need. Replacement builds the next snapshot without holding any lock and
/// then swaps the pointer, so a reader sees either the old graph or the new
/// one in full.
pub struct GraphStore {
    current: RwLock<Arc<GraphSnapshot>>,
    next_generation: AtomicU64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(GraphSnapshot::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// The snapshot active right now.
    pub fn current(&self) -> Arc<GraphSnapshot> {
        // The guarded value is a plain pointer, so a poisoned lock still holds
        // a whole snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a new snapshot from full record sets and make it current.
    /// The previous snapshot is discarded, never merged.
    pub fn replace(&self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Arc<GraphSnapshot> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let snapshot = Arc::new(GraphSnapshot::build(generation, nodes, edges));
        if !self.publish(Arc::clone(&snapshot)) {
            debug!(generation, "newer snapshot already published, skipping swap");
            return self.current();
        }

        info!(
            "Graph built: {} nodes, {} edges ({})",
            snapshot.node_count(),
            snapshot.edge_count(),
            snapshot.snapshot_id()
        );
        snapshot
    }

    /// Swap in `snapshot` unless a later generation is already current.
    fn publish(&self, snapshot: Arc<GraphSnapshot>) -> bool {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if guard.generation() > snapshot.generation() {
            return false;
        }
        *guard = snapshot;
        true
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
