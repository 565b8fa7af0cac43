use std::cmp::Ordering;
use storage::GraphSnapshot;
use wayfind_core::model::GraphNode;

/// Evacuation rules: head for the closest exit, never ride an elevator.
pub struct EmergencyGoalResolver<'a> {
    snapshot: &'a GraphSnapshot,
}

impl<'a> EmergencyGoalResolver<'a> {
    pub fn new(snapshot: &'a GraphSnapshot) -> Self {
        Self { snapshot }
    }

    /// EXIT node with the smallest straight-line distance to `source`, ties
    /// going to the lowest id. Connectivity is not considered: the closest
    /// exit may still be unreachable by graph.
    pub fn nearest_exit(&self, source: &GraphNode) -> Option<&'a GraphNode> {
        self.snapshot
            .nodes()
            .filter(|node| node.is_exit())
            .min_by(|a, b| exit_preference(source, a, b))
    }

    /// Whether `node` may be entered during an evacuation.
    pub fn admits(&self, node: &GraphNode) -> bool {
        !node.is_elevator()
    }
}

fn exit_preference(source: &GraphNode, a: &GraphNode, b: &GraphNode) -> Ordering {
    source
        .straight_line_distance(a)
        .total_cmp(&source.straight_line_distance(b))
        .then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::model::{GraphEdge, NodeType};

    fn node(id: u64, node_type: NodeType, x: f64, y: f64) -> GraphNode {
        GraphNode::new(id, node_type, format!("{node_type} {id}"), x, y, 1)
    }

    #[test]
    fn test_nearest_exit_by_straight_line() {
        let start = node(1, NodeType::Office, 0.0, 0.0);
        let snapshot = GraphSnapshot::build(
            1,
            vec![
                start.clone(),
                node(2, NodeType::Exit, 10.0, 0.0),
                node(3, NodeType::Exit, 0.0, 4.0),
                node(4, NodeType::Restroom, 0.0, 1.0),
            ],
            vec![GraphEdge::new(1, 2, 10.0)],
        );

        let resolver = EmergencyGoalResolver::new(&snapshot);
        // Exit 3 wins on distance even though only exit 2 is connected
        assert_eq!(resolver.nearest_exit(&start).map(|n| n.id), Some(3));
    }

    #[test]
    fn test_nearest_exit_tie_goes_to_lowest_id() {
        let start = node(1, NodeType::Lab, 0.0, 0.0);
        let snapshot = GraphSnapshot::build(
            1,
            vec![
                start.clone(),
                node(8, NodeType::Exit, 0.0, 5.0),
                node(6, NodeType::Exit, 5.0, 0.0),
                node(7, NodeType::Exit, -3.0, -4.0),
            ],
            vec![],
        );

        let resolver = EmergencyGoalResolver::new(&snapshot);
        assert_eq!(resolver.nearest_exit(&start).map(|n| n.id), Some(6));
    }

    #[test]
    fn test_no_exit_in_snapshot() {
        let start = node(1, NodeType::Office, 0.0, 0.0);
        let snapshot = GraphSnapshot::build(
            1,
            vec![start.clone(), node(2, NodeType::Stairs, 1.0, 0.0)],
            vec![],
        );

        assert!(EmergencyGoalResolver::new(&snapshot)
            .nearest_exit(&start)
            .is_none());
    }

    #[test]
    fn test_admits_everything_but_elevators() {
        let snapshot = GraphSnapshot::empty();
        let resolver = EmergencyGoalResolver::new(&snapshot);
        for t in NodeType::ALL {
            let candidate = node(1, t, 0.0, 0.0);
            assert_eq!(resolver.admits(&candidate), t != NodeType::Elevator);
        }
    }

    #[test]
    fn test_exit_preference_orders_by_distance_then_id() {
        let source = node(1, NodeType::Office, 0.0, 0.0);
        let near = node(5, NodeType::Exit, 1.0, 0.0);
        let far = node(2, NodeType::Exit, 9.0, 0.0);
        let near_twin = node(3, NodeType::Exit, 0.0, 1.0);

        assert_eq!(exit_preference(&source, &near, &far), Ordering::Less);
        assert_eq!(exit_preference(&source, &near, &near_twin), Ordering::Greater);
    }
}
