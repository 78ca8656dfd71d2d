// src/pipeline/graph.rs

use anyhow::{Result, anyhow};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

/// One unit of work in the build pipeline.
///
/// The set of tasks is closed: the orchestrator dispatches on this enum, so a
/// node can never reference work that does not exist. Watch rules reuse the
/// same kinds for their chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    CopyImages,
    CopyFavicon,
    CopyFonts,
    BuildSprite,
    CompileStyles,
    PrefixStyles,
    ExtractStyleVariables,
    CopyStyleguide,
    CopyStyleguideCss,
    CopySpriteCss,
    CopyScaffoldingCss,
    BundleScripts,
    BuildPatterns,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::CopyImages => "copy:images",
            TaskKind::CopyFavicon => "copy:favicon",
            TaskKind::CopyFonts => "copy:fonts",
            TaskKind::BuildSprite => "svg-sprite",
            TaskKind::CompileStyles => "styles:compile",
            TaskKind::PrefixStyles => "styles:prefix",
            TaskKind::ExtractStyleVariables => "styles:extract",
            TaskKind::CopyStyleguide => "copy:styleguide",
            TaskKind::CopyStyleguideCss => "copy:styleguide-css",
            TaskKind::CopySpriteCss => "copy:svg-css",
            TaskKind::CopyScaffoldingCss => "copy:pattern-scaffolding",
            TaskKind::BundleScripts => "scripts:bundle",
            TaskKind::BuildPatterns => "patterns:build",
        }
    }
}

/// Opaque handle to a registered task node.
///
/// Handles are produced by [`TaskGraphBuilder::add`] and are the only way to
/// declare a dependency, so a dependency always points at a task registered
/// earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub(crate) NodeIndex);

/// Builder for a [`TaskGraph`].
#[derive(Debug, Default)]
pub struct TaskGraphBuilder {
    graph: DiGraph<TaskKind, ()>,
}

impl TaskGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task with its dependencies. Edge direction: dependency
    /// points at dependent.
    pub fn add(&mut self, kind: TaskKind, deps: &[TaskHandle]) -> TaskHandle {
        let node = self.graph.add_node(kind);
        for dep in deps {
            self.graph.add_edge(dep.0, node, ());
        }
        TaskHandle(node)
    }

    /// Finalize and validate the graph.
    ///
    /// Handle-before-use registration already rules cycles out, but the graph
    /// is still validated with a topological sort so that any future
    /// construction path keeps the acyclicity invariant.
    pub fn build(self) -> Result<TaskGraph> {
        let order = toposort(&self.graph, None).map_err(|cycle| {
            let kind = self.graph[cycle.node_id()];
            anyhow!("cycle detected in task graph involving '{}'", kind.name())
        })?;

        Ok(TaskGraph {
            graph: self.graph,
            order,
        })
    }
}

/// Validated, immutable task graph. Built once at startup.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    pub(crate) graph: DiGraph<TaskKind, ()>,
    order: Vec<NodeIndex>,
}

impl TaskGraph {
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Task kinds in a valid execution order (for diagnostics and dry runs).
    pub fn topo_order(&self) -> impl Iterator<Item = TaskKind> + '_ {
        self.order.iter().map(|idx| self.graph[*idx])
    }

    /// Direct dependencies of a node, by kind name.
    pub(crate) fn dependency_names(&self, idx: NodeIndex) -> Vec<&'static str> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|dep| self.graph[dep].name())
            .collect()
    }
}
