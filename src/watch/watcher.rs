// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::paths::relative_str;
use crate::pipeline::{BuildOrchestrator, TaskKind};
use crate::serve::ReloadHub;
use crate::watch::rules::WatchRule;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher observing `root` recursively.
///
/// Change events are matched against every rule's patterns; each matching
/// rule gets a tick on its own debounce loop. After a rule's events settle,
/// its task chain runs and, on success, the reload notification (if any)
/// goes out through the hub.
///
/// Rule executions are independent: a new settled burst starts the chain
/// again even if a previous execution of the same chain is still in flight,
/// and chains of different rules run concurrently. A failed chain logs a
/// warning and waits for the next triggering event.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    rules: Vec<WatchRule>,
    orchestrator: Arc<BuildOrchestrator>,
    hub: Arc<ReloadHub>,
    settle: Duration,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone()); // best-effort

    // One debounce loop per rule; the dispatcher only needs the matchers.
    let mut matchers = Vec::with_capacity(rules.len());
    for rule in rules {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel::<()>();
        let name = rule.name;
        matchers.push((rule.clone(), tick_tx));
        tokio::spawn(rule_loop(
            name,
            rule.chain,
            rule.reload,
            tick_rx,
            Arc::clone(&orchestrator),
            Arc::clone(&hub),
            settle,
        ));
    }

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        {
            let event_tx = event_tx.clone();
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(err) = event_tx.send(event) {
                        // We can't log via tracing here easily, so fallback to stderr.
                        eprintln!("patternpipe: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("patternpipe: file watch error: {err}");
                }
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    // Dispatcher: consume notify events and tick every matching rule.
    let async_root = root.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            for path in &event.paths {
                let Some(rel_str) = relative_str(&async_root, path) else {
                    debug!(
                        "could not relativize path {:?} against root {:?}",
                        path, async_root
                    );
                    continue;
                };

                for (rule, tick_tx) in &matchers {
                    if rule.matches(&rel_str) {
                        debug!(rule = rule.name, path = %rel_str, "watch match");
                        if tick_tx.send(()).is_err() {
                            warn!(rule = rule.name, "rule loop gone; dropping tick");
                        }
                    }
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Debounce loop for one rule.
///
/// Waits for a first tick, then keeps absorbing ticks until `settle` passes
/// with none, then fires the rule's chain in its own task so this loop is
/// immediately ready for the next burst.
async fn rule_loop(
    name: &'static str,
    chain: Vec<TaskKind>,
    reload: Option<crate::serve::ReloadKind>,
    mut tick_rx: mpsc::UnboundedReceiver<()>,
    orchestrator: Arc<BuildOrchestrator>,
    hub: Arc<ReloadHub>,
    settle: Duration,
) {
    loop {
        if tick_rx.recv().await.is_none() {
            debug!(rule = name, "tick channel closed; rule loop ending");
            return;
        }

        // Settle: absorb the burst until the file stays quiet.
        loop {
            match timeout(settle, tick_rx.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        let chain = chain.clone();
        let orchestrator = Arc::clone(&orchestrator);
        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            run_rule(name, chain, reload, orchestrator, hub).await;
        });
    }
}

async fn run_rule(
    name: &'static str,
    chain: Vec<TaskKind>,
    reload: Option<crate::serve::ReloadKind>,
    orchestrator: Arc<BuildOrchestrator>,
    hub: Arc<ReloadHub>,
) {
    info!(rule = name, "change settled; running rule");

    let result = orchestrator.run_chain(&chain).await;

    match result {
        Ok(()) => {
            if let Some(kind) = reload {
                hub.notify(kind);
            }
        }
        Err(err) => {
            // Watch mode keeps running; the operator re-triggers by saving
            // the file again.
            warn!(rule = name, error = %err, "rule chain failed");
        }
    }
}
