//! A* route search over a single graph snapshot.

use crate::emergency::EmergencyGoalResolver;
use crate::frontier::{HeapOpenSet, LinearOpenSet, OpenSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storage::GraphSnapshot;
use thiserror::Error;
use tracing::{debug, trace};
use wayfind_core::config::FrontierStrategy;
use wayfind_core::error::{ErrorCode, WayfindError};
use wayfind_core::model::{GraphNode, NodeId};

/// A found route, start first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub total_distance: f64,
    pub nodes: Vec<GraphNode>,
    /// Destination actually searched for. Differs from the requested one in
    /// emergency mode.
    pub goal_id: NodeId,
    pub emergency: bool,
    pub snapshot_id: String,
    pub nodes_expanded: usize,
}

impl Route {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|node| node.id).collect()
    }
}

/// Why no route was produced. Callers see all of these as `NOT_FOUND`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("start location {0} not found")]
    UnknownStart(NodeId),
    #[error("destination location {0} not found")]
    UnknownGoal(NodeId),
    #[error("no exit available for emergency route from {0}")]
    NoExit(NodeId),
    #[error("no path from {start} to {goal} ({expanded} nodes expanded)")]
    Exhausted {
        start: NodeId,
        goal: NodeId,
        expanded: usize,
    },
}

impl WayfindError for RouteError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::NotFound
    }
}

/// A* pathfinder bound to one snapshot.
///
/// All per-search state lives inside [`PathFinder::navigate`]; the snapshot is
/// only read.
pub struct PathFinder<'a> {
    snapshot: &'a GraphSnapshot,
    strategy: FrontierStrategy,
}

impl<'a> PathFinder<'a> {
    pub fn new(snapshot: &'a GraphSnapshot, strategy: FrontierStrategy) -> Self {
        Self { snapshot, strategy }
    }

    /// Create with the default linear-scan frontier
    pub fn with_defaults(snapshot: &'a GraphSnapshot) -> Self {
        Self::new(snapshot, FrontierStrategy::default())
    }

    /// Shortest route from `start_id` to `end_id`.
    ///
    /// With `emergency` set, `end_id` is ignored: the goal becomes the exit
    /// closest to the start in a straight line, and elevators are never
    /// entered.
    pub fn navigate(
        &self,
        start_id: NodeId,
        end_id: NodeId,
        emergency: bool,
    ) -> Result<Route, RouteError> {
        let start = self
            .snapshot
            .node(start_id)
            .ok_or(RouteError::UnknownStart(start_id))?;

        let resolver = EmergencyGoalResolver::new(self.snapshot);
        let goal = if emergency {
            let exit = resolver
                .nearest_exit(start)
                .ok_or(RouteError::NoExit(start_id))?;
            debug!(
                start = start_id,
                requested = end_id,
                exit = exit.id,
                "emergency goal override"
            );
            exit
        } else {
            self.snapshot
                .node(end_id)
                .ok_or(RouteError::UnknownGoal(end_id))?
        };

        match self.strategy {
            FrontierStrategy::LinearScan => {
                self.search::<LinearOpenSet>(start, goal, emergency.then_some(&resolver))
            }
            FrontierStrategy::BinaryHeap => {
                self.search::<HeapOpenSet>(start, goal, emergency.then_some(&resolver))
            }
        }
    }

    fn search<S: OpenSet>(
        &self,
        start: &GraphNode,
        goal: &GraphNode,
        evacuation: Option<&EmergencyGoalResolver<'_>>,
    ) -> Result<Route, RouteError> {
        trace!(start = start.id, goal = goal.id, "A* search");

        let mut open_set = S::default();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
        let mut g_scores: HashMap<NodeId, f64> = HashMap::new();

        g_scores.insert(start.id, 0.0);
        open_set.admit(start.id, heuristic(start, goal));

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop_min() {
            nodes_expanded += 1;

            let current_g = g_scores.get(&current).copied().unwrap_or(f64::INFINITY);
            if current == goal.id {
                return Ok(self.reconstruct_path(
                    &came_from,
                    goal.id,
                    current_g,
                    evacuation.is_some(),
                    nodes_expanded,
                ));
            }

            for &(neighbor_id, weight) in self.snapshot.neighbors(current) {
                let Some(neighbor) = self.snapshot.node(neighbor_id) else {
                    continue;
                };
                if let Some(resolver) = evacuation {
                    if !resolver.admits(neighbor) {
                        continue;
                    }
                }

                let tentative_g = current_g + weight;
                let known_g = g_scores.get(&neighbor_id).copied().unwrap_or(f64::INFINITY);
                if tentative_g < known_g {
                    came_from.insert(neighbor_id, current);
                    g_scores.insert(neighbor_id, tentative_g);
                    open_set.admit(neighbor_id, tentative_g + heuristic(neighbor, goal));
                }
            }
        }

        debug!(
            start = start.id,
            goal = goal.id,
            nodes_expanded,
            "no path, frontier exhausted"
        );
        Err(RouteError::Exhausted {
            start: start.id,
            goal: goal.id,
            expanded: nodes_expanded,
        })
    }

    fn reconstruct_path(
        &self,
        came_from: &HashMap<NodeId, NodeId>,
        goal_id: NodeId,
        total_distance: f64,
        emergency: bool,
        nodes_expanded: usize,
    ) -> Route {
        let mut ids = vec![goal_id];
        let mut current = goal_id;
        while let Some(&prev) = came_from.get(&current) {
            ids.push(prev);
            current = prev;
        }
        ids.reverse();

        let nodes = ids
            .into_iter()
            .filter_map(|id| self.snapshot.node(id).cloned())
            .collect();

        Route {
            total_distance,
            nodes,
            goal_id,
            emergency,
            snapshot_id: self.snapshot.snapshot_id(),
            nodes_expanded,
        }
    }
}

/// Straight-line estimate. Exact lower bound on one floor; across floors the
/// plan frames are unrelated and the estimate may overshoot.
fn heuristic(from: &GraphNode, to: &GraphNode) -> f64 {
    from.straight_line_distance(to)
}
