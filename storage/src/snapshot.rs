use crate::index::{AdjacencyGraph, EdgeData};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};
use wayfind_core::model::{GraphEdge, GraphNode, NodeId};

/// One complete, immutable instance of the navigation graph.
///
/// A snapshot is built in full before anyone can see it and is never mutated
/// afterwards. Readers share it behind an `Arc`; a reload produces a brand new
/// snapshot instead of touching this one.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    generation: u64,
    built_at: DateTime<Utc>,
    nodes: HashMap<NodeId, GraphNode>,
    graph: AdjacencyGraph,
    dropped_edges: usize,
}

impl GraphSnapshot {
    /// The snapshot served before the first successful build.
    pub fn empty() -> Self {
        Self {
            generation: 0,
            built_at: Utc::now(),
            nodes: HashMap::new(),
            graph: AdjacencyGraph::new(),
            dropped_edges: 0,
        }
    }

    /// Build a snapshot from full record sets.
    ///
    /// Every edge whose endpoints both resolve becomes two adjacency entries.
    /// Edges naming an unknown node are dropped and counted. A repeated node
    /// id replaces the earlier record.
    pub fn build(generation: u64, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut node_map = HashMap::with_capacity(nodes.len());
        let mut graph = AdjacencyGraph::with_capacity(nodes.len());

        for node in nodes {
            graph.add_node(node.id);
            node_map.insert(node.id, node);
        }

        let mut dropped_edges = 0;
        for edge in edges {
            if !node_map.contains_key(&edge.start_node_id)
                || !node_map.contains_key(&edge.end_node_id)
            {
                debug!(
                    start = edge.start_node_id,
                    end = edge.end_node_id,
                    "dropping edge with unknown endpoint"
                );
                dropped_edges += 1;
                continue;
            }
            graph.add_undirected_edge(edge.start_node_id, edge.end_node_id, edge.distance);
        }

        if dropped_edges > 0 {
            warn!(generation, dropped_edges, "edges referencing unknown nodes were ignored");
        }

        Self {
            generation,
            built_at: Utc::now(),
            nodes: node_map,
            graph,
            dropped_edges,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot_id(&self) -> String {
        format!("graph-gen-{}", self.generation)
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// All nodes ordered by id.
    pub fn sorted_nodes(&self) -> Vec<GraphNode> {
        let mut out: Vec<GraphNode> = self.nodes.values().cloned().collect();
        out.sort_by_key(|node| node.id);
        out
    }

    pub fn neighbors(&self, id: NodeId) -> &[EdgeData] {
        self.graph.neighbors(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records that made it into the adjacency index.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for GraphSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
