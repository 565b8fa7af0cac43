#![allow(dead_code)]

use wayfind_core::model::{GraphEdge, GraphNode, NodeType};

pub fn node(id: u64, node_type: NodeType, x: f64, y: f64, floor_id: u64) -> GraphNode {
    GraphNode::new(id, node_type, format!("{node_type} {id}"), x, y, floor_id)
}

/// A(0,0)=1 B(3,0)=2 C(3,4)=3 D(0,4)=4 on one floor, D is the exit.
pub fn square() -> (Vec<GraphNode>, Vec<GraphEdge>) {
    (
        vec![
            node(1, NodeType::Office, 0.0, 0.0, 1),
            node(2, NodeType::Office, 3.0, 0.0, 1),
            node(3, NodeType::Office, 3.0, 4.0, 1),
            node(4, NodeType::Exit, 0.0, 4.0, 1),
        ],
        vec![
            GraphEdge::new(1, 2, 3.0),
            GraphEdge::new(2, 3, 4.0),
            GraphEdge::new(3, 4, 3.0),
            GraphEdge::new(1, 4, 5.0),
        ],
    )
}

/// Two floors joined by an elevator shaft (5/13) and a stairwell (6/14).
/// Floor plans are aligned and every edge is at least as long as the
/// straight line between its ends, so the heuristic never overestimates.
pub fn campus() -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let nodes = vec![
        node(1, NodeType::MainHall, 0.0, 0.0, 1),
        node(2, NodeType::Office, 10.0, 0.0, 1).with_room_number("1092"),
        node(3, NodeType::Classroom, 10.0, 8.0, 1).with_room_number("F1060"),
        node(4, NodeType::Exit, 0.0, 12.0, 1),
        node(5, NodeType::Elevator, 5.0, 5.0, 1),
        node(6, NodeType::Stairs, 12.0, 4.0, 1),
        node(7, NodeType::Restroom, 3.0, 8.0, 1),
        node(11, NodeType::Lab, 0.0, 0.0, 2),
        node(12, NodeType::Office, 6.0, 0.0, 2).with_room_number("2183"),
        node(13, NodeType::Elevator, 5.0, 5.0, 2),
        node(14, NodeType::Stairs, 12.0, 4.0, 2),
        node(15, NodeType::Conference, 6.0, 8.0, 2),
        node(16, NodeType::Exit, 0.0, 20.0, 2),
    ];
    let edges = vec![
        GraphEdge::new(1, 2, 10.0),
        GraphEdge::new(2, 6, 4.5),
        GraphEdge::new(6, 3, 4.5),
        GraphEdge::new(3, 7, 7.0),
        GraphEdge::new(7, 4, 5.0),
        GraphEdge::new(1, 4, 12.0),
        GraphEdge::new(1, 5, 7.5),
        GraphEdge::new(2, 5, 7.5),
        GraphEdge::new(5, 13, 3.0),
        GraphEdge::new(6, 14, 6.0),
        GraphEdge::new(13, 11, 7.5),
        GraphEdge::new(13, 12, 5.5),
        GraphEdge::new(12, 14, 7.5),
        GraphEdge::new(14, 15, 7.5),
        GraphEdge::new(11, 16, 20.0),
        GraphEdge::new(15, 16, 13.5),
        GraphEdge::new(11, 12, 6.0),
    ];
    (nodes, edges)
}
