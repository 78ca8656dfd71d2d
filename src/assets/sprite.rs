// src/assets/sprite.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::fs;

use crate::config::ConfigFile;
use crate::exec::ToolCommand;

/// Aggregates the individual icon files into one sprite sheet, a companion
/// stylesheet, and a preview template, by invoking the configured external
/// sprite compiler on the icon directory.
#[derive(Debug, Clone)]
pub struct SpriteBuilder {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
}

impl SpriteBuilder {
    pub fn new(cfg: Arc<ConfigFile>, root: impl Into<PathBuf>) -> Self {
        Self {
            cfg,
            root: root.into(),
        }
    }

    pub async fn build(&self) -> Result<()> {
        let src = self.root.join(&self.cfg.paths.source.icons);
        let dest = self.root.join(&self.cfg.paths.public.root);
        fs::create_dir_all(&dest)
            .await
            .with_context(|| format!("creating output directory {:?}", dest))?;

        ToolCommand::new("svg-sprite", &self.cfg.tools.svg_sprite)
            .run(&[
                ("src", &src.to_string_lossy()),
                ("dest", &dest.to_string_lossy()),
            ])
            .await
    }
}
