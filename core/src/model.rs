use crate::error::{ErrorCode, WayfindError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type NodeId = u64;
pub type FloorId = u64;

/// Functional category of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Office,
    Classroom,
    Lab,
    Exit,
    Elevator,
    Stairs,
    Restroom,
    Service,
    Conference,
    Lockers,
    MainHall,
    PrayerRoom,
    ServerRoom,
    StoreRoom,
    Theater,
}

impl NodeType {
    pub const ALL: [NodeType; 15] = [
        NodeType::Office,
        NodeType::Classroom,
        NodeType::Lab,
        NodeType::Exit,
        NodeType::Elevator,
        NodeType::Stairs,
        NodeType::Restroom,
        NodeType::Service,
        NodeType::Conference,
        NodeType::Lockers,
        NodeType::MainHall,
        NodeType::PrayerRoom,
        NodeType::ServerRoom,
        NodeType::StoreRoom,
        NodeType::Theater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Office => "OFFICE",
            NodeType::Classroom => "CLASSROOM",
            NodeType::Lab => "LAB",
            NodeType::Exit => "EXIT",
            NodeType::Elevator => "ELEVATOR",
            NodeType::Stairs => "STAIRS",
            NodeType::Restroom => "RESTROOM",
            NodeType::Service => "SERVICE",
            NodeType::Conference => "CONFERENCE",
            NodeType::Lockers => "LOCKERS",
            NodeType::MainHall => "MAIN_HALL",
            NodeType::PrayerRoom => "PRAYER_ROOM",
            NodeType::ServerRoom => "SERVER_ROOM",
            NodeType::StoreRoom => "STORE_ROOM",
            NodeType::Theater => "THEATER",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown node type: {0}")]
pub struct UnknownNodeType(pub String);

impl WayfindError for UnknownNodeType {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}

/// A typed point of interest. Coordinates are local to the owning floor's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    #[serde(default, alias = "roomNumber", skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(alias = "floorId")]
    pub floor_id: FloorId,
}

impl GraphNode {
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        name: impl Into<String>,
        x: f64,
        y: f64,
        floor_id: FloorId,
    ) -> Self {
        Self {
            id,
            node_type,
            name: name.into(),
            room_number: None,
            x,
            y,
            floor_id,
        }
    }

    pub fn with_room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }

    /// Straight-line distance in plan units. Only meaningful when both nodes
    /// share a floor; the frames of different floors are unrelated.
    pub fn straight_line_distance(&self, other: &GraphNode) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_exit(&self) -> bool {
        self.node_type == NodeType::Exit
    }

    pub fn is_elevator(&self) -> bool {
        self.node_type == NodeType::Elevator
    }
}

/// A walkable connection. Stored with a direction but traversable both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    pub distance: f64,
}

impl GraphEdge {
    pub fn new(start_node_id: NodeId, end_node_id: NodeId, distance: f64) -> Self {
        Self {
            start_node_id,
            end_node_id,
            distance,
        }
    }
}
