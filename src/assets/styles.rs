// src/assets/styles.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::exec::ToolCommand;

/// Drives the stylesheet pipeline: compile, prefix, extract variables.
///
/// Compilation and prefixing are delegated to the configured external tools;
/// variable extraction is done in-process since it is plain text parsing.
#[derive(Debug, Clone)]
pub struct StyleTransformer {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
}

/// One extracted stylesheet variable, as written into the JSON data files
/// consumed by the pattern source tree.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StyleVariable {
    pub name: String,
    pub value: String,
}

impl StyleTransformer {
    pub fn new(cfg: Arc<ConfigFile>, root: impl Into<PathBuf>) -> Self {
        Self {
            cfg,
            root: root.into(),
        }
    }

    /// Compile the stylesheet source directory into the public css directory.
    pub async fn compile(&self) -> Result<()> {
        let src = self.root.join(&self.cfg.paths.source.css);
        let dest = self.root.join(&self.cfg.paths.public.css);
        fs::create_dir_all(&dest)
            .await
            .with_context(|| format!("creating output directory {:?}", dest))?;

        ToolCommand::new("sass", &self.cfg.tools.sass)
            .run(&[
                ("src", &src.to_string_lossy()),
                ("dest", &dest.to_string_lossy()),
            ])
            .await
    }

    /// Apply vendor prefixing to the compiled entry stylesheet in place.
    pub async fn prefix(&self) -> Result<()> {
        let file = self
            .root
            .join(&self.cfg.paths.public.css)
            .join(&self.cfg.styles.entry);

        ToolCommand::new("autoprefixer", &self.cfg.tools.autoprefixer)
            .run(&[("file", &file.to_string_lossy())])
            .await
    }

    /// Extract declared stylesheet variables into JSON data files.
    ///
    /// Each `[[styles.extract]]` rule reads its source stylesheet, keeps the
    /// variable declarations whose names start with the rule's prefix, and
    /// writes them as a JSON array of `{ "name", "value" }` objects.
    pub async fn extract_variables(&self) -> Result<()> {
        if self.cfg.styles.extract.is_empty() {
            debug!("no variable extraction rules configured");
            return Ok(());
        }

        for rule in &self.cfg.styles.extract {
            let src = self.root.join(&rule.src);
            let contents = fs::read_to_string(&src)
                .await
                .with_context(|| format!("reading stylesheet {:?} for extraction", src))?;

            let variables = extract_prefixed_variables(&contents, &rule.prefix)?;

            let dest = self.root.join(&rule.dest);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating output directory {:?}", parent))?;
            }

            let json = serde_json::to_vec_pretty(&variables)
                .context("serializing extracted variables")?;

            // The dest lives in the watched pattern tree; an unchanged
            // rewrite would still raise a change event there.
            if fs::read(&dest).await.ok().as_deref() == Some(json.as_slice()) {
                debug!(dest = %rule.dest, "extracted variables unchanged; not rewriting");
                continue;
            }
            fs::write(&dest, json)
                .await
                .with_context(|| format!("writing extracted variables to {:?}", dest))?;

            info!(
                prefix = %rule.prefix,
                count = variables.len(),
                dest = %rule.dest,
                "extracted stylesheet variables"
            );
        }

        Ok(())
    }
}

/// Parse variable declarations (`$name: value;`) whose names start with
/// `prefix`. `!default` flags are dropped from the value.
pub fn extract_prefixed_variables(contents: &str, prefix: &str) -> Result<Vec<StyleVariable>> {
    let decl = Regex::new(r"^\s*(\$[A-Za-z0-9_-]+)\s*:\s*(.+?)\s*(?:!default\s*)?;")
        .context("compiling variable declaration regex")?;

    let mut variables = Vec::new();

    for line in contents.lines() {
        let Some(caps) = decl.captures(line) else {
            continue;
        };
        let name = &caps[1];
        if !name.starts_with(prefix) {
            continue;
        }
        variables.push(StyleVariable {
            name: name.to_string(),
            value: caps[2].trim().to_string(),
        });
    }

    Ok(variables)
}
