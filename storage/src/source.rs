use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tokio::fs;
use wayfind_core::model::{GraphEdge, GraphNode, NodeId};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed graph document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("graph source unavailable: {0}")]
    Unavailable(String),
}

/// Record store the navigation graph is materialized from.
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn fetch_all_nodes(&self) -> Result<Vec<GraphNode>, SourceError>;
    async fn fetch_all_edges(&self) -> Result<Vec<GraphEdge>, SourceError>;

    /// Both record sets for one rebuild. The default fetches them
    /// concurrently; sources that can read both from one consistent view
    /// should override it.
    async fn fetch_graph(&self) -> Result<(Vec<GraphNode>, Vec<GraphEdge>), SourceError> {
        tokio::try_join!(self.fetch_all_nodes(), self.fetch_all_edges())
    }
}

/// On-disk layout read by [`JsonFileGraphSource`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// Reads a `{ "nodes": [...], "edges": [...] }` document on every fetch, so
/// edits to the file are picked up by the next reload. A rebuild parses the
/// file once, so nodes and edges always come from the same version.
pub struct JsonFileGraphSource {
    path: PathBuf,
}

impl JsonFileGraphSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_document(&self) -> Result<GraphDocument, SourceError> {
        let raw = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[async_trait]
impl GraphSource for JsonFileGraphSource {
    async fn fetch_all_nodes(&self) -> Result<Vec<GraphNode>, SourceError> {
        Ok(self.read_document().await?.nodes)
    }

    async fn fetch_all_edges(&self) -> Result<Vec<GraphEdge>, SourceError> {
        Ok(self.read_document().await?.edges)
    }

    async fn fetch_graph(&self) -> Result<(Vec<GraphNode>, Vec<GraphEdge>), SourceError> {
        let document = self.read_document().await?;
        Ok((document.nodes, document.edges))
    }
}

/// Mutable in-process record set. Changes only reach routing after a reload.
#[derive(Default)]
pub struct InMemoryGraphSource {
    records: RwLock<GraphDocument>,
}

impl InMemoryGraphSource {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            records: RwLock::new(GraphDocument { nodes, edges }),
        }
    }

    pub fn replace(&self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        *records = GraphDocument { nodes, edges };
    }

    pub fn upsert_node(&self, node: GraphNode) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.nodes.retain(|n| n.id != node.id);
        records.nodes.push(node);
    }

    pub fn add_edge(&self, edge: GraphEdge) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.edges.push(edge);
    }

    /// Remove the node record only. Edges that referenced it stay behind and
    /// are dropped at build time, like orphaned rows in a database.
    pub fn remove_node(&self, id: NodeId) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let before = records.nodes.len();
        records.nodes.retain(|n| n.id != id);
        records.nodes.len() < before
    }

    pub fn document(&self) -> GraphDocument {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl GraphSource for InMemoryGraphSource {
    async fn fetch_all_nodes(&self) -> Result<Vec<GraphNode>, SourceError> {
        Ok(self.document().nodes)
    }

    async fn fetch_all_edges(&self) -> Result<Vec<GraphEdge>, SourceError> {
        Ok(self.document().edges)
    }

    async fn fetch_graph(&self) -> Result<(Vec<GraphNode>, Vec<GraphEdge>), SourceError> {
        let document = self.document();
        Ok((document.nodes, document.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::model::NodeType;

    #[tokio::test]
    async fn test_in_memory_source_mutations() {
        let source = InMemoryGraphSource::new(
            vec![GraphNode::new(1, NodeType::Exit, "Gate", 0.0, 0.0, 1)],
            vec![],
        );
        source.upsert_node(GraphNode::new(2, NodeType::Stairs, "Stairs", 1.0, 0.0, 1));
        source.add_edge(GraphEdge::new(1, 2, 1.0));

        assert_eq!(source.fetch_all_nodes().await.unwrap().len(), 2);
        assert_eq!(source.fetch_all_edges().await.unwrap().len(), 1);

        assert!(source.remove_node(1));
        assert!(!source.remove_node(1));
        assert_eq!(source.fetch_all_nodes().await.unwrap().len(), 1);
        assert_eq!(source.fetch_all_edges().await.unwrap().len(), 1);

        let (nodes, edges) = source.fetch_graph().await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(edges, vec![GraphEdge::new(1, 2, 1.0)]);
    }
}
