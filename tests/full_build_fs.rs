// tests/full_build_fs.rs

//! End-to-end full build against a real temp directory, with the external
//! tools stubbed out by shell commands and the engine replaced by a fake.

#![cfg(unix)]

mod common;

use std::sync::Arc;

use patternpipe::engine::PatternEngine;
use patternpipe::pipeline::BuildOrchestrator;
use tempfile::TempDir;

use common::{FakeEngine, default_config, read_file, write_file};

fn stub_tools(cfg: &mut patternpipe::config::ConfigFile) {
    // Stand-ins that leave a visible trace where the real tools would write.
    cfg.tools.sass = "cp {src}/style.scss {dest}/style.css".to_string();
    cfg.tools.autoprefixer = "printf '/*prefixed*/' >> {file}".to_string();
    // The real sprite tool also regenerates the companion stylesheet next
    // to the stylesheet sources.
    cfg.tools.svg_sprite =
        "printf '<svg/>' > {dest}/icons.svg && printf 'fresh' > {src}/../css/svg-sprite.css"
            .to_string();
    cfg.tools.bundle = "cat {src}/*.js > {dest}".to_string();
    cfg.tools.vendor_bundle = "true".to_string();
}

#[tokio::test]
async fn full_build_populates_the_output_tree() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("source/css/style.scss"), b"body{margin:0}");
    write_file(&root.path().join("source/js/app.js"), b"console.log(1);");
    write_file(&root.path().join("source/images/logo.png"), b"png");
    write_file(&root.path().join("source/fonts/brand.woff2"), b"woff");
    write_file(&root.path().join("source/favicon.ico"), b"icon");
    write_file(&root.path().join("source/icons/arrow.svg"), b"<svg/>");
    write_file(&root.path().join("source/css/svg-sprite.css"), b"stale");

    let mut cfg = default_config();
    stub_tools(&mut cfg);

    let engine = Arc::new(FakeEngine::default());
    let orchestrator = BuildOrchestrator::new(
        Arc::new(cfg),
        root.path(),
        Arc::clone(&engine) as Arc<dyn PatternEngine>,
    )
    .unwrap();

    orchestrator.run_full_build().await.unwrap();

    let public = root.path().join("public");
    assert_eq!(read_file(&public.join("images/logo.png")), b"png");
    assert_eq!(read_file(&public.join("fonts/brand.woff2")), b"woff");
    assert_eq!(read_file(&public.join("favicon.ico")), b"icon");
    assert_eq!(read_file(&public.join("icons.svg")), b"<svg/>");

    // The published companion stylesheet is the regenerated one, not the
    // bytes that were on disk before the sprite tool ran.
    assert_eq!(read_file(&public.join("css/svg-sprite.css")), b"fresh");

    let css = String::from_utf8(read_file(&public.join("css/style.css"))).unwrap();
    assert!(css.starts_with("body{margin:0}"));
    assert!(css.ends_with("/*prefixed*/"), "prefixing ran after compile");

    assert_eq!(
        read_file(&public.join("js/production.min.js")),
        b"console.log(1);"
    );

    // The engine ran exactly once, with the configured clean policy.
    assert_eq!(engine.builds.lock().unwrap().as_slice(), &[true]);

    // A second run converges to the same bytes.
    orchestrator.run_full_build().await.unwrap();
    let css_again = String::from_utf8(read_file(&public.join("css/style.css"))).unwrap();
    assert_eq!(css, css_again);
    assert_eq!(read_file(&public.join("images/logo.png")), b"png");
    assert_eq!(engine.builds.lock().unwrap().as_slice(), &[true, true]);
}

#[tokio::test]
async fn failing_tool_fails_the_build_and_skips_the_engine() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("source/css/style.scss"), b"body{}");

    let mut cfg = default_config();
    stub_tools(&mut cfg);
    cfg.tools.sass = "exit 3".to_string();

    let engine = Arc::new(FakeEngine::default());
    let orchestrator = BuildOrchestrator::new(
        Arc::new(cfg),
        root.path(),
        Arc::clone(&engine) as Arc<dyn PatternEngine>,
    )
    .unwrap();

    let result = orchestrator.run_full_build().await;
    assert!(result.is_err());
    assert!(
        engine.builds.lock().unwrap().is_empty(),
        "engine must not build after a failed phase"
    );
}

#[tokio::test]
async fn clean_purges_and_recreates_the_output_directory() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("public/css/stale.css"), b"old");

    let cfg = default_config();
    let engine = Arc::new(FakeEngine::default());
    let orchestrator =
        BuildOrchestrator::new(Arc::new(cfg), root.path(), engine as Arc<dyn PatternEngine>)
            .unwrap();

    orchestrator.clean().await.unwrap();

    let public = root.path().join("public");
    assert!(public.is_dir());
    assert!(!public.join("css").exists());
}
