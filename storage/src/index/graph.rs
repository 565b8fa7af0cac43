use std::collections::HashMap;
use wayfind_core::model::NodeId;

/// Adjacency entry: (neighbor_id, weight)
pub type EdgeData = (NodeId, f64);

/// Undirected weighted adjacency list. Each undirected edge is stored as one
/// entry on each endpoint.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    adjacency: HashMap<NodeId, Vec<EdgeData>>,
    edge_count: usize,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Register a vertex with no edges yet.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Insert `a <-> b`. Parallel edges are kept; search picks the cheapest.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.adjacency.entry(a).or_default().push((b, weight));
        self.adjacency.entry(b).or_default().push((a, weight));
        self.edge_count += 1;
    }

    /// Outgoing entries of `id`; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &[EdgeData] {
        self.adjacency
            .get(&id)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Number of undirected edges inserted.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl Default for AdjacencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_edges_are_bidirectional() {
        let mut graph = AdjacencyGraph::new();
        graph.add_undirected_edge(1, 2, 3.0);
        graph.add_undirected_edge(1, 3, 5.0);

        assert_eq!(graph.neighbors(1).len(), 2);
        assert_eq!(graph.neighbors(2), &[(1, 3.0)]);
        assert_eq!(graph.neighbors(3), &[(1, 5.0)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_graph_parallel_edges_kept() {
        let mut graph = AdjacencyGraph::new();
        graph.add_undirected_edge(1, 2, 4.0);
        graph.add_undirected_edge(2, 1, 1.5);

        assert_eq!(graph.neighbors(1), &[(2, 4.0), (2, 1.5)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_graph_isolated_and_unknown_nodes() {
        let mut graph = AdjacencyGraph::new();
        graph.add_node(9);

        assert!(graph.neighbors(9).is_empty());
        assert!(graph.neighbors(10).is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
