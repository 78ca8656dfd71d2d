// src/pipeline/mod.rs

//! The build pipeline core.
//!
//! - [`graph`] holds the explicit, typed task graph: nodes are [`TaskKind`]s,
//!   dependencies are handles created at registration time, and the graph is
//!   cycle-validated once at startup.
//! - [`runner`] executes a graph: independent ready tasks run concurrently,
//!   dependents start only after their dependencies complete.
//! - [`orchestrator`] wires the asset components and the pattern engine into
//!   the full-build graph and exposes the top-level build/export/clean
//!   operations.

pub mod graph;
pub mod orchestrator;
pub mod runner;

pub use graph::{TaskGraph, TaskGraphBuilder, TaskHandle, TaskKind};
pub use orchestrator::{BuildOrchestrator, Pipeline};
pub use runner::TaskExecutor;
