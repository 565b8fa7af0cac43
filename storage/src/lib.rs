pub mod index;
pub mod snapshot;
pub mod source;
pub mod store;

pub use snapshot::GraphSnapshot;
pub use source::{GraphSource, InMemoryGraphSource, JsonFileGraphSource, SourceError};
pub use store::GraphStore;
