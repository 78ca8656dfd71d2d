// tests/watch_runtime.rs

//! The watcher end to end: real filesystem events through the settle
//! debounce, rule chains and reload notifications.

#![cfg(unix)]

mod common;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use patternpipe::config::{ConfigFile, ExtractRule};
use patternpipe::engine::PatternEngine;
use patternpipe::paths::PathResolver;
use patternpipe::pipeline::BuildOrchestrator;
use patternpipe::serve::{ReloadHub, ReloadKind};
use patternpipe::watch::{WatcherHandle, build_watch_rules, spawn_watcher};
use tempfile::TempDir;
use tokio::time::{sleep, timeout};

use common::{FakeEngine, default_config, write_file};

const SETTLE: Duration = Duration::from_millis(100);

struct WatchFixture {
    root: TempDir,
    engine: Arc<FakeEngine>,
    hub: Arc<ReloadHub>,
    _watcher: WatcherHandle,
}

fn noop_tools(cfg: &mut ConfigFile) {
    cfg.tools.sass = "true".to_string();
    cfg.tools.autoprefixer = "true".to_string();
    cfg.tools.svg_sprite = "true".to_string();
    cfg.tools.bundle = "true".to_string();
    cfg.tools.vendor_bundle = "true".to_string();
}

fn start(mut cfg: ConfigFile) -> WatchFixture {
    let root = TempDir::new().unwrap();
    noop_tools(&mut cfg);

    // Watched directories must exist before the watcher registers.
    for dir in ["source/_patterns/atoms", "source/css/scss", "source/js"] {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }

    let cfg = Arc::new(cfg);
    let engine = Arc::new(FakeEngine::default());
    let orchestrator = Arc::new(
        BuildOrchestrator::new(
            Arc::clone(&cfg),
            root.path(),
            Arc::clone(&engine) as Arc<dyn PatternEngine>,
        )
        .unwrap(),
    );
    let hub = Arc::new(ReloadHub::new());

    let resolver = PathResolver::new(root.path());
    let rules = build_watch_rules(&cfg, &resolver, &engine.template_extensions()).unwrap();
    let watcher = spawn_watcher(
        root.path(),
        rules,
        orchestrator,
        Arc::clone(&hub),
        SETTLE,
    )
    .unwrap();

    WatchFixture {
        root,
        engine,
        hub,
        _watcher: watcher,
    }
}

#[tokio::test]
async fn one_template_change_yields_one_engine_build_and_one_full_reload() {
    let mut cfg = default_config();
    // An extraction rule makes the engine-rebuild path interesting: its
    // output lands under the watched pattern tree.
    cfg.styles.extract = vec![ExtractRule {
        src: "source/css/scss/_variables.scss".to_string(),
        dest: "source/_patterns/atoms/colors.json".to_string(),
        prefix: "$color-".to_string(),
    }];

    let fixture = start(cfg);
    let mut reloads = fixture.hub.subscribe();

    write_file(
        &fixture.root.path().join("source/_patterns/atoms/button.mustache"),
        b"{{label}}",
    );

    let kind = timeout(Duration::from_secs(5), reloads.recv())
        .await
        .expect("a reload arrives after the burst settles")
        .unwrap();
    assert_eq!(kind, ReloadKind::Full);

    // Give any follow-up trigger ample time to fire, then check nothing did.
    sleep(Duration::from_secs(1)).await;
    assert_eq!(
        fixture.engine.build_count(),
        1,
        "one settled burst is exactly one engine build"
    );
    assert!(
        reloads.try_recv().is_err(),
        "no further reloads without further changes"
    );
}

#[tokio::test]
async fn stylesheet_change_runs_the_style_chain_and_announces_css() {
    let fixture = start(default_config());
    let mut reloads = fixture.hub.subscribe();

    write_file(
        &fixture.root.path().join("source/css/scss/base.scss"),
        b"body { margin: 0; }",
    );

    let kind = timeout(Duration::from_secs(5), reloads.recv())
        .await
        .expect("a reload arrives after the burst settles")
        .unwrap();
    assert_eq!(kind, ReloadKind::Css);
    assert_eq!(
        fixture.engine.build_count(),
        0,
        "a stylesheet change never drives the engine"
    );
}

#[tokio::test]
async fn a_burst_of_writes_settles_into_one_chain_run() {
    let fixture = start(default_config());
    let mut reloads = fixture.hub.subscribe();

    // Several rapid writes to the same watched category.
    for i in 0..5 {
        write_file(
            &fixture.root.path().join("source/js/app.js"),
            format!("console.log({i});").as_bytes(),
        );
        sleep(Duration::from_millis(10)).await;
    }

    let kind = timeout(Duration::from_secs(5), reloads.recv())
        .await
        .expect("a reload arrives after the burst settles")
        .unwrap();
    assert_eq!(kind, ReloadKind::Js);

    sleep(Duration::from_secs(1)).await;
    assert!(
        reloads.try_recv().is_err(),
        "the burst collapses into a single chain run"
    );

    // The bundler created its output directory even with a no-op stub tool.
    assert!(fixture.root.path().join("public/js").is_dir());
}
