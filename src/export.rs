// src/export.rs

//! Publishing into the external style-guide project.
//!
//! The export copies rendered pattern artifacts, compiled CSS, bundled JS,
//! the icon sprite and images into a sibling project directory. Fully
//! rendered standalone HTML documents (`*.rendered.html`) are filtered out;
//! pattern-library-specific markup regions are stripped from the exported
//! HTML fragments afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tokio::fs;
use tracing::{debug, info};

use crate::assets::copy::{copy_file_into, copy_tree};
use crate::config::ConfigFile;

/// Pattern matching fully-rendered standalone HTML documents, which never
/// leave the build tree.
pub const RENDERED_HTML_PATTERN: &str = "**/*.rendered.html";

pub struct Exporter {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
}

impl Exporter {
    pub fn new(cfg: Arc<ConfigFile>, root: impl Into<PathBuf>) -> Self {
        Self {
            cfg,
            root: root.into(),
        }
    }

    fn path(&self, role: &str) -> PathBuf {
        self.root.join(role)
    }

    fn target(&self) -> PathBuf {
        self.root.join(&self.cfg.export.target)
    }

    /// Copy the rendered output into the style-guide project, then strip
    /// pattern-library markup from the exported fragments.
    pub async fn export(&self) -> Result<()> {
        let target = self.target();
        let patterns = self.path(&self.cfg.paths.public.patterns);
        let exclude = rendered_html_filter()?;

        // Pattern fragments feed both the include snippets and the live
        // pattern iframe directory of the style guide.
        copy_tree(
            &patterns,
            &target.join("_includes/patterns"),
            None,
            Some(&exclude),
            false,
        )
        .await?;
        copy_tree(
            &patterns,
            &target.join("patterns"),
            None,
            Some(&exclude),
            false,
        )
        .await?;

        copy_tree(
            &self.path(&self.cfg.paths.public.css),
            &target.join("css"),
            None,
            None,
            false,
        )
        .await?;
        copy_tree(
            &self.path(&self.cfg.paths.public.js),
            &target.join("js"),
            None,
            None,
            false,
        )
        .await?;
        copy_tree(
            &self.path(&self.cfg.paths.public.images),
            &target.join("images"),
            None,
            None,
            false,
        )
        .await?;

        // The combined icon sprite lands in the style-guide root.
        copy_file_into(
            &self.path(&self.cfg.paths.public.root).join("icons.svg"),
            &target,
        )
        .await?;

        self.strip_exported_fragments(&target.join("patterns"))
            .await?;

        info!(target = %self.cfg.export.target, "export finished");
        Ok(())
    }

    /// Rewrite every exported `.html` fragment with its marked regions
    /// removed.
    async fn strip_exported_fragments(&self, dir: &Path) -> Result<()> {
        if !fs::try_exists(dir).await.unwrap_or(false) {
            return Ok(());
        }

        let mut stripped = 0usize;
        let mut stack = vec![dir.to_path_buf()];

        while let Some(current) = stack.pop() {
            let mut entries = fs::read_dir(&current)
                .await
                .with_context(|| format!("reading directory {:?}", current))?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;

                if file_type.is_dir() {
                    stack.push(path);
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) != Some("html") {
                    continue;
                }

                let contents = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading exported fragment {:?}", path))?;
                let cleaned = strip_markup(
                    &contents,
                    &self.cfg.export.strip_begin,
                    &self.cfg.export.strip_end,
                );

                if cleaned != contents {
                    fs::write(&path, cleaned)
                        .await
                        .with_context(|| format!("writing stripped fragment {:?}", path))?;
                    stripped += 1;
                }
            }
        }

        debug!(stripped, "stripped pattern-library markup from fragments");
        Ok(())
    }
}

fn rendered_html_filter() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new(RENDERED_HTML_PATTERN)?);
    Ok(builder.build()?)
}

/// Remove every region between `begin` and `end` markers, inclusive.
///
/// An unterminated region is removed to the end of the input; markers with
/// no counterpart before them are left in place.
pub fn strip_markup(input: &str, begin: &str, end: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(begin) {
        out.push_str(&rest[..start]);
        let after_begin = &rest[start + begin.len()..];
        match after_begin.find(end) {
            Some(stop) => {
                rest = &after_begin[stop + end.len()..];
            }
            None => {
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
