pub mod emergency;
pub mod frontier;
pub mod lifecycle;
pub mod pathfinder;
pub mod request;
pub mod service;

pub use emergency::EmergencyGoalResolver;
pub use lifecycle::{GraphLifecycle, LifecycleError, ReloadSummary};
pub use pathfinder::{PathFinder, Route, RouteError};
pub use request::{NavigateRequest, RequestError};
pub use service::{NavigationError, NavigationService};
