use jobs::{ChannelJobQueue, Job, JobQueue, Worker};
use navigation::NavigationService;
use std::sync::Arc;
use storage::InMemoryGraphSource;
use tokio::sync::mpsc;
use wayfind_core::error::ErrorCode;
use wayfind_core::model::{GraphEdge, GraphNode, NodeType};

fn hallway() -> InMemoryGraphSource {
    InMemoryGraphSource::new(
        vec![
            GraphNode::new(1, NodeType::Office, "Office", 0.0, 0.0, 1),
            GraphNode::new(2, NodeType::Exit, "Exit", 6.0, 0.0, 1),
        ],
        vec![GraphEdge::new(1, 2, 6.0)],
    )
}

fn reload(by: &str) -> Job {
    Job::ReloadGraph {
        requested_by: Some(by.to_string()),
    }
}

#[tokio::test]
async fn test_reload_job_rebuilds_graph() {
    let source = Arc::new(hallway());
    let service = Arc::new(NavigationService::new(source.clone()));
    service.build().await.unwrap();

    let (queue, receiver) = ChannelJobQueue::bounded(4);
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(Worker::new(receiver, service.clone()).with_outcomes(outcome_tx).run());

    source.upsert_node(GraphNode::new(3, NodeType::Lab, "Lab", 3.0, 2.0, 1));
    source.add_edge(GraphEdge::new(1, 3, 4.0));
    assert!(service.navigate(1, 3, false).is_err());

    queue.enqueue(reload("admin")).await.unwrap();
    let outcome = outcome_rx.recv().await.unwrap();
    assert_eq!(outcome.job, reload("admin"));
    let summary = outcome.result.unwrap();
    assert_eq!(summary.snapshot_id, "graph-gen-2");
    assert_eq!(summary.node_count, 3);

    assert_eq!(service.navigate(1, 3, false).unwrap().total_distance, 4.0);

    drop(queue);
    worker.await.unwrap();
}

#[tokio::test]
async fn test_queued_reloads_are_coalesced() {
    let source = Arc::new(hallway());
    let service = Arc::new(NavigationService::new(source));
    service.build().await.unwrap();

    let (queue, receiver) = ChannelJobQueue::bounded(8);
    for by in ["a", "b", "c"] {
        queue.enqueue(reload(by)).await.unwrap();
    }
    drop(queue);

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    Worker::new(receiver, service.clone())
        .with_outcomes(outcome_tx)
        .run()
        .await;

    let outcome = outcome_rx.recv().await.unwrap();
    assert_eq!(outcome.job, reload("a"));
    assert_eq!(outcome.coalesced, 2);
    assert!(outcome_rx.recv().await.is_none());
    assert_eq!(service.snapshot().generation(), 2);
}

#[tokio::test]
async fn test_failed_reload_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(storage::JsonFileGraphSource::new(dir.path().join("missing.json")));
    let service = Arc::new(NavigationService::new(source));

    let (queue, receiver) = ChannelJobQueue::bounded(1);
    queue.enqueue(Job::ReloadGraph { requested_by: None }).await.unwrap();
    drop(queue);

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    Worker::new(receiver, service.clone())
        .with_outcomes(outcome_tx)
        .run()
        .await;

    let err = outcome_rx.recv().await.unwrap().result.unwrap_err();
    assert_eq!(err.error_code, ErrorCode::Unavailable);
    assert_eq!(service.metrics().reloads_failed, 1);
    assert!(service.all_nodes().is_empty());
}
