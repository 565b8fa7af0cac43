use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct RouteMetrics {
    pub total_requests: u64,
    pub routes_found: u64,
    pub not_found: u64,
    pub emergency_requests: u64,
    pub latencies: VecDeque<u64>, // microseconds
}

#[derive(Debug, Clone, Default)]
pub struct ReloadMetrics {
    pub succeeded: u64,
    pub failed: u64,
    pub last_node_count: usize,
    pub last_edge_count: usize,
}

#[derive(Clone)]
pub struct MetricsCollector {
    state: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    route_metrics: RouteMetrics,
    reload_metrics: ReloadMetrics,
    max_history: usize,
}

impl MetricsCollector {
    pub fn new(max_history: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(MetricsState {
                route_metrics: RouteMetrics::default(),
                reload_metrics: ReloadMetrics::default(),
                max_history,
            })),
        }
    }

    // Counters stay usable even if a recording thread panicked.
    fn state(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_route(&self, latency_us: u64, found: bool, emergency: bool) {
        let mut state = self.state();
        let max_history = state.max_history;
        let r = &mut state.route_metrics;
        r.total_requests += 1;
        if found {
            r.routes_found += 1;
        } else {
            r.not_found += 1;
        }
        if emergency {
            r.emergency_requests += 1;
        }
        r.latencies.push_back(latency_us);
        if r.latencies.len() > max_history {
            r.latencies.pop_front();
        }
    }

    pub fn record_reload_success(&self, node_count: usize, edge_count: usize) {
        let mut state = self.state();
        state.reload_metrics.succeeded += 1;
        state.reload_metrics.last_node_count = node_count;
        state.reload_metrics.last_edge_count = edge_count;
    }

    pub fn record_reload_failure(&self) {
        self.state().reload_metrics.failed += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.state();
        let r = &state.route_metrics;
        let l = &state.reload_metrics;

        let mut sorted_latencies: Vec<u64> = r.latencies.iter().copied().collect();
        sorted_latencies.sort_unstable();

        let p50 = percentile(&sorted_latencies, 50.0);
        let p95 = percentile(&sorted_latencies, 95.0);
        let p99 = percentile(&sorted_latencies, 99.0);

        let found_rate = if r.total_requests > 0 {
            r.routes_found as f32 / r.total_requests as f32
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests: r.total_requests,
            routes_found: r.routes_found,
            not_found: r.not_found,
            emergency_requests: r.emergency_requests,
            found_rate,
            p50,
            p95,
            p99,
            history_count: r.latencies.len(),
            reloads_succeeded: l.succeeded,
            reloads_failed: l.failed,
            node_count: l.last_node_count,
            edge_count: l.last_edge_count,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(1024)
    }
}

fn percentile(sorted: &[u64], p: f32) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((p / 100.0) * (sorted.len() as f32)).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub routes_found: u64,
    pub not_found: u64,
    pub emergency_requests: u64,
    pub found_rate: f32,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub history_count: usize,
    pub reloads_succeeded: u64,
    pub reloads_failed: u64,
    pub node_count: usize,
    pub edge_count: usize,
}
