use crate::lifecycle::{GraphLifecycle, LifecycleError, ReloadSummary};
use crate::pathfinder::{PathFinder, Route, RouteError};
use crate::request::{NavigateRequest, RequestError};
use std::sync::Arc;
use std::time::Instant;
use storage::{GraphSnapshot, GraphSource};
use thiserror::Error;
use tracing::{debug, info, warn};
use wayfind_core::config::{FrontierStrategy, NavigationConfig};
use wayfind_core::error::{ErrorCode, ErrorResponse, WayfindError};
use wayfind_core::metrics::{MetricsCollector, MetricsSnapshot};
use wayfind_core::model::{GraphNode, NodeId};

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("no route: {0}")]
    NoRoute(#[from] RouteError),
    #[error("graph reload failed: {0}")]
    Reload(#[from] LifecycleError),
}

impl WayfindError for NavigationError {
    fn error_code(&self) -> ErrorCode {
        match self {
            NavigationError::InvalidRequest(err) => err.error_code(),
            NavigationError::NoRoute(err) => err.error_code(),
            NavigationError::Reload(err) => err.error_code(),
        }
    }
}

impl NavigationError {
    pub fn is_not_found(&self) -> bool {
        self.error_code() == ErrorCode::NotFound
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::from_error(self)
    }
}

/// Entry point for callers: routing against the current snapshot plus the
/// build/reload lifecycle behind it.
pub struct NavigationService {
    lifecycle: GraphLifecycle,
    strategy: FrontierStrategy,
    metrics: MetricsCollector,
}

impl NavigationService {
    pub fn new(source: Arc<dyn GraphSource>) -> Self {
        Self {
            lifecycle: GraphLifecycle::new(source),
            strategy: FrontierStrategy::default(),
            metrics: MetricsCollector::default(),
        }
    }

    pub fn from_config(source: Arc<dyn GraphSource>, config: &NavigationConfig) -> Self {
        Self::new(source)
            .with_strategy(config.frontier)
            .with_metrics(MetricsCollector::new(config.metrics_history))
    }

    pub fn with_strategy(mut self, strategy: FrontierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub async fn build(&self) -> Result<ReloadSummary, NavigationError> {
        let result = self.lifecycle.build().await;
        self.record_rebuild(result)
    }

    pub async fn reload(&self) -> Result<ReloadSummary, NavigationError> {
        let result = self.lifecycle.reload().await;
        self.record_rebuild(result)
    }

    fn record_rebuild(
        &self,
        result: Result<ReloadSummary, LifecycleError>,
    ) -> Result<ReloadSummary, NavigationError> {
        match result {
            Ok(summary) => {
                self.metrics
                    .record_reload_success(summary.node_count, summary.edge_count);
                Ok(summary)
            }
            Err(err) => {
                self.metrics.record_reload_failure();
                Err(err.into())
            }
        }
    }

    /// Shortest route on the snapshot current at call time. A reload that
    /// lands mid-search does not affect this call.
    pub fn navigate(
        &self,
        start_id: NodeId,
        end_id: NodeId,
        emergency: bool,
    ) -> Result<Route, NavigationError> {
        let started = Instant::now();
        let snapshot = self.lifecycle.store().current();
        let result = PathFinder::new(&snapshot, self.strategy).navigate(start_id, end_id, emergency);
        let latency_us = started.elapsed().as_micros() as u64;

        self.metrics
            .record_route(latency_us, result.is_ok(), emergency);

        match &result {
            Ok(route) => info!(
                start = start_id,
                goal = route.goal_id,
                emergency,
                hops = route.nodes.len(),
                distance = route.total_distance,
                latency_us,
                "route found"
            ),
            Err(err) => warn!(start = start_id, end = end_id, emergency, "no route: {}", err),
        }

        result.map_err(NavigationError::from)
    }

    pub fn navigate_request(&self, request: &NavigateRequest) -> Result<Route, NavigationError> {
        request.validate()?;
        self.navigate(
            request.start_location_id,
            request.end_location_id,
            request.emergency,
        )
    }

    pub fn navigate_json(&self, raw: &str) -> Result<Route, NavigationError> {
        let request = NavigateRequest::parse_json(raw)?;
        self.navigate_request(&request)
    }

    /// Every navigable location in the current snapshot, ordered by id.
    pub fn all_nodes(&self) -> Vec<GraphNode> {
        let snapshot = self.lifecycle.store().current();
        debug!(snapshot_id = %snapshot.snapshot_id(), "listing locations");
        snapshot.sorted_nodes()
    }

    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        self.lifecycle.store().current()
    }

    pub fn strategy(&self) -> FrontierStrategy {
        self.strategy
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
