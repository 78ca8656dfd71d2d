// tests/export_filter.rs

//! Export filtering and markup stripping: rendered HTML documents never
//! leave the build tree, and exported fragments lose their marked regions.

mod common;

use std::sync::Arc;

use patternpipe::export::{Exporter, strip_markup};
use tempfile::TempDir;

use common::{default_config, read_file, write_file};

#[tokio::test]
async fn rendered_html_is_excluded_from_both_pattern_copies() {
    let root = TempDir::new().unwrap();
    let patterns = root.path().join("public/patterns");
    write_file(&patterns.join("atoms/button/button.html"), b"<button/>");
    write_file(
        &patterns.join("atoms/button/button.rendered.html"),
        b"<html><button/></html>",
    );
    write_file(&patterns.join("atoms/button/button.mustache"), b"{{label}}");

    let mut cfg = default_config();
    cfg.export.target = "style-guide".to_string();
    let exporter = Exporter::new(Arc::new(cfg), root.path());
    exporter.export().await.unwrap();

    let target = root.path().join("style-guide");
    for dir in ["_includes/patterns", "patterns"] {
        let base = target.join(dir).join("atoms/button");
        assert!(base.join("button.html").exists(), "{dir} keeps fragments");
        assert!(base.join("button.mustache").exists(), "{dir} keeps templates");
        assert!(
            !base.join("button.rendered.html").exists(),
            "{dir} must not contain rendered documents"
        );
    }
}

#[tokio::test]
async fn exported_fragments_lose_marked_regions() {
    let root = TempDir::new().unwrap();
    write_file(
        &root.path().join("public/patterns/page.html"),
        b"<p>keep</p><!--patternlab:start--><nav>drop</nav><!--patternlab:end--><p>tail</p>",
    );

    let mut cfg = default_config();
    cfg.export.target = "style-guide".to_string();
    let exporter = Exporter::new(Arc::new(cfg), root.path());
    exporter.export().await.unwrap();

    let exported = read_file(&root.path().join("style-guide/patterns/page.html"));
    assert_eq!(exported, b"<p>keep</p><p>tail</p>");

    // The snippet copy is left unstripped for include-time use.
    let snippet = read_file(&root.path().join("style-guide/_includes/patterns/page.html"));
    assert!(String::from_utf8(snippet).unwrap().contains("patternlab:start"));
}

#[tokio::test]
async fn sprite_file_lands_in_target_root_when_present() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("public/icons.svg"), b"<svg/>");

    let mut cfg = default_config();
    cfg.export.target = "style-guide".to_string();
    let exporter = Exporter::new(Arc::new(cfg), root.path());
    exporter.export().await.unwrap();

    assert_eq!(
        read_file(&root.path().join("style-guide/icons.svg")),
        b"<svg/>"
    );
}

#[test]
fn strip_markup_removes_regions_inclusive() {
    let out = strip_markup("a<!--b:s-->x<!--b:e-->c", "<!--b:s-->", "<!--b:e-->");
    assert_eq!(out, "ac");
}

#[test]
fn strip_markup_handles_multiple_regions() {
    let out = strip_markup(
        "1<!--s-->x<!--e-->2<!--s-->y<!--e-->3",
        "<!--s-->",
        "<!--e-->",
    );
    assert_eq!(out, "123");
}

#[test]
fn strip_markup_unterminated_region_runs_to_end() {
    let out = strip_markup("head<!--s-->dangling", "<!--s-->", "<!--e-->");
    assert_eq!(out, "head");
}

#[test]
fn strip_markup_orphan_end_marker_is_kept() {
    let out = strip_markup("a<!--e-->b", "<!--s-->", "<!--e-->");
    assert_eq!(out, "a<!--e-->b");
}
