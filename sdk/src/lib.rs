//! Embeddable wayfinding runtime.
//!
//! [`Runtime`] wires a graph source, the navigation service and the
//! background reload worker together. [`Command`] is the line protocol the
//! `wayfind` binary speaks on stdin/stdout.

pub mod command;
pub mod runtime;

pub use command::Command;
pub use runtime::{Runtime, SdkError};
