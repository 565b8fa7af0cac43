use crate::command::Command;
use jobs::{ChannelJobQueue, Job, JobQueue, Worker};
use navigation::{NavigationError, NavigationService, ReloadSummary, Route};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use storage::{GraphSource, JsonFileGraphSource};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};
use wayfind_core::config::AppConfig;
use wayfind_core::error::{ErrorCode, ErrorResponse, WayfindError};
use wayfind_core::metrics::MetricsSnapshot;
use wayfind_core::model::{GraphNode, NodeId, NodeType};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("initial graph build failed: {0}")]
    InitialBuild(#[source] NavigationError),
    #[error("reload queue unavailable: {0}")]
    Queue(String),
}

impl WayfindError for SdkError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SdkError::InitialBuild(err) => err.error_code(),
            SdkError::Queue(_) => ErrorCode::Unavailable,
        }
    }
}

pub struct Runtime {
    service: Arc<NavigationService>,
    queue: ChannelJobQueue,
    worker: JoinHandle<()>,
}

impl Runtime {
    /// Builds the first snapshot and starts the reload worker. Startup fails
    /// if the first build does.
    pub async fn start(config: &AppConfig, source: Arc<dyn GraphSource>) -> Result<Self, SdkError> {
        let service = Arc::new(NavigationService::from_config(source, &config.navigation));
        let summary = service.build().await.map_err(SdkError::InitialBuild)?;
        info!(
            snapshot_id = %summary.snapshot_id,
            nodes = summary.node_count,
            edges = summary.edge_count,
            frontier = ?service.strategy(),
            "navigation runtime ready"
        );

        let (queue, receiver) = ChannelJobQueue::bounded(config.graph.reload_queue_capacity);
        let worker = tokio::spawn(Worker::new(receiver, service.clone()).run());

        Ok(Self {
            service,
            queue,
            worker,
        })
    }

    /// Reads the graph from the JSON document named by `graph.source_path`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, SdkError> {
        let source = Arc::new(JsonFileGraphSource::new(&config.graph.source_path));
        Self::start(config, source).await
    }

    pub fn navigate(
        &self,
        start_id: NodeId,
        end_id: NodeId,
        emergency: bool,
    ) -> Result<Route, NavigationError> {
        self.service.navigate(start_id, end_id, emergency)
    }

    pub fn all_nodes(&self) -> Vec<GraphNode> {
        self.service.all_nodes()
    }

    /// Locations of one type, ordered by id.
    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<GraphNode> {
        let mut nodes = self.all_nodes();
        nodes.retain(|node| node.node_type == node_type);
        nodes
    }

    /// Hands a reload to the background worker and returns without waiting
    /// for it to run.
    pub async fn request_reload(&self, requested_by: Option<String>) -> Result<(), SdkError> {
        self.queue
            .enqueue(Job::ReloadGraph { requested_by })
            .await
            .map_err(|e| SdkError::Queue(e.to_string()))
    }

    pub async fn reload_now(&self) -> Result<ReloadSummary, NavigationError> {
        self.service.reload().await
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.service.metrics()
    }

    pub fn service(&self) -> &Arc<NavigationService> {
        &self.service
    }

    /// Runs one protocol command. Failures come back as an error body, never
    /// as an `Err`.
    pub async fn execute(&self, command: Command) -> Value {
        match command {
            Command::Navigate(raw) => {
                render(self.service.navigate_json(&raw).map_err(|e| e.to_response()))
            }
            Command::Locations(None) => render(Ok(self.all_nodes())),
            Command::Locations(Some(filter)) => render(
                filter
                    .parse::<NodeType>()
                    .map(|node_type| self.nodes_of_type(node_type))
                    .map_err(|e| ErrorResponse::from_error(&e)),
            ),
            Command::Reload => render(self.reload_now().await.map_err(|e| e.to_response())),
            Command::Metrics => render(Ok(self.metrics())),
        }
    }

    /// Closes the reload queue and waits for queued work to finish.
    pub async fn shutdown(self) {
        drop(self.queue);
        if let Err(e) = self.worker.await {
            error!("Reload worker terminated abnormally: {}", e);
        }
    }
}

fn render<T: Serialize>(result: Result<T, ErrorResponse>) -> Value {
    let value = match result {
        Ok(body) => serde_json::to_value(body),
        Err(response) => serde_json::to_value(response),
    };
    value.unwrap_or_else(|e| {
        serde_json::json!({
            "error_code": ErrorCode::Internal,
            "message": e.to_string(),
        })
    })
}
