// src/pipeline/runner.rs

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::pipeline::graph::{TaskGraph, TaskKind};

/// Executes a single task kind.
///
/// The production implementation is [`crate::pipeline::Pipeline`]; tests
/// substitute recording fakes.
pub trait TaskExecutor: Send + Sync {
    fn execute(&self, kind: TaskKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

impl TaskGraph {
    /// Run the whole graph to completion.
    ///
    /// Ready tasks (all dependencies done) run concurrently on the executor;
    /// a dependent starts only after every dependency succeeded. On the first
    /// failure no new tasks are scheduled, in-flight tasks are allowed to
    /// finish, and the first error is returned. Already-flushed writes are
    /// not rolled back.
    pub async fn run(&self, executor: Arc<dyn TaskExecutor>) -> Result<()> {
        let mut pending: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let deps = self
                    .graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count();
                (idx, deps)
            })
            .collect();

        let mut join_set: JoinSet<(NodeIndex, Result<()>)> = JoinSet::new();
        let mut first_error: Option<anyhow::Error> = None;

        let roots: Vec<NodeIndex> = pending
            .iter()
            .filter(|(_, deps)| **deps == 0)
            .map(|(idx, _)| *idx)
            .collect();
        for idx in &roots {
            pending.remove(idx);
        }
        for idx in roots {
            spawn_task(&mut join_set, Arc::clone(&executor), self.graph[idx], idx);
        }

        while let Some(joined) = join_set.join_next().await {
            let (idx, result) = joined.context("pipeline task panicked")?;
            let kind = self.graph[idx];

            match result {
                Ok(()) => {
                    debug!(task = kind.name(), "task finished");

                    if first_error.is_some() {
                        // Draining only; the run is already failed.
                        continue;
                    }

                    let dependents: Vec<NodeIndex> = self
                        .graph
                        .neighbors_directed(idx, Direction::Outgoing)
                        .collect();

                    for dependent in dependents {
                        let Some(deps) = pending.get_mut(&dependent) else {
                            continue;
                        };
                        *deps -= 1;
                        if *deps == 0 {
                            pending.remove(&dependent);
                            spawn_task(
                                &mut join_set,
                                Arc::clone(&executor),
                                self.graph[dependent],
                                dependent,
                            );
                        }
                    }
                }
                Err(err) => {
                    warn!(task = kind.name(), error = %err, "task failed");
                    if first_error.is_none() {
                        first_error = Some(err.context(format!("task '{}' failed", kind.name())));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn spawn_task(
    join_set: &mut JoinSet<(NodeIndex, Result<()>)>,
    executor: Arc<dyn TaskExecutor>,
    kind: TaskKind,
    idx: NodeIndex,
) {
    debug!(task = kind.name(), "dependencies satisfied; starting task");
    join_set.spawn(async move {
        let result = executor.execute(kind).await;
        (idx, result)
    });
}
