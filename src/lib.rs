// src/lib.rs

pub mod assets;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod export;
pub mod logging;
pub mod paths;
pub mod pipeline;
pub mod serve;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::ConfigFile;
use crate::config::loader::load_and_validate;
use crate::engine::{CliEngine, PatternEngine};
use crate::paths::PathResolver;
use crate::pipeline::BuildOrchestrator;
use crate::serve::ReloadHub;
use crate::watch::{build_watch_rules, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the pattern engine adapter
/// - the build orchestrator and its task graph
/// - (for watch/serve) the file watcher, reload hub and dev server
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = Arc::new(load_and_validate(&config_path)?);
    let root = config_root_dir(&config_path);

    let engine: Arc<dyn PatternEngine> = Arc::new(CliEngine::new(Arc::clone(&cfg)));
    let orchestrator = Arc::new(BuildOrchestrator::new(
        Arc::clone(&cfg),
        &root,
        Arc::clone(&engine),
    )?);

    match args.command {
        Command::Build { dry_run } => {
            if dry_run {
                orchestrator.print_dry_run();
                Ok(())
            } else {
                orchestrator.run_full_build().await
            }
        }
        Command::Watch => {
            orchestrator.run_full_build().await?;
            // The hub has no subscribers without the dev server; notifications
            // are dropped.
            let hub = Arc::new(ReloadHub::new());
            let _watcher = start_watching(&cfg, &root, &orchestrator, &engine, &hub)?;
            wait_for_shutdown().await
        }
        Command::Serve => {
            orchestrator.run_full_build().await?;
            let hub = Arc::new(ReloadHub::new());
            let _watcher = start_watching(&cfg, &root, &orchestrator, &engine, &hub)?;

            tokio::select! {
                result = serve::serve(Arc::clone(&cfg), root.clone(), Arc::clone(&hub)) => result,
                result = wait_for_shutdown() => result,
            }
        }
        Command::Export => orchestrator.run_export().await,
        Command::Clean => orchestrator.clean().await,
        Command::PatternsOnly => engine.patterns_only(cfg.clean_public).await,
        Command::Version => engine.version().await,
        Command::EngineHelp => engine.help().await,
        Command::ListStarterKits => engine.list_starter_kits().await,
        Command::LoadStarterKit { kit, clean } => engine.load_starter_kit(&kit, clean).await,
        Command::InstallPlugin { plugin } => engine.install_plugin(&plugin).await,
    }
}

/// Build the watch rules and spawn the filesystem watcher.
fn start_watching(
    cfg: &Arc<ConfigFile>,
    root: &Path,
    orchestrator: &Arc<BuildOrchestrator>,
    engine: &Arc<dyn PatternEngine>,
    hub: &Arc<ReloadHub>,
) -> Result<crate::watch::WatcherHandle> {
    let resolver = PathResolver::new(root);
    let rules = build_watch_rules(cfg, &resolver, &engine.template_extensions())?;

    for rule in &rules {
        info!(rule = rule.name, "watching");
    }

    spawn_watcher(
        root,
        rules,
        Arc::clone(orchestrator),
        Arc::clone(hub),
        Duration::from_millis(cfg.watch.settle_ms),
    )
}

/// Block until Ctrl-C.
async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested, stopping");
    Ok(())
}

/// Figure out a sensible project root.
/// Currently: directory containing the config file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
