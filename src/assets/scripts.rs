// src/assets/scripts.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::config::ConfigFile;
use crate::exec::ToolCommand;

/// Produces the production script bundles by invoking the configured
/// external minifier: one concatenated/minified application bundle, plus a
/// vendor bundle from the `vendor/` subdirectory.
#[derive(Debug, Clone)]
pub struct ScriptBundler {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
}

impl ScriptBundler {
    pub fn new(cfg: Arc<ConfigFile>, root: impl Into<PathBuf>) -> Self {
        Self {
            cfg,
            root: root.into(),
        }
    }

    pub async fn bundle(&self) -> Result<()> {
        let src = self.root.join(&self.cfg.paths.source.js);
        let dest_dir = self.root.join(&self.cfg.paths.public.js);
        fs::create_dir_all(&dest_dir)
            .await
            .with_context(|| format!("creating output directory {:?}", dest_dir))?;

        // Application bundle.
        let bundle_file = dest_dir.join(&self.cfg.scripts.bundle);
        ToolCommand::new("bundle", &self.cfg.tools.bundle)
            .run(&[
                ("src", &src.to_string_lossy()),
                ("dest", &bundle_file.to_string_lossy()),
            ])
            .await?;

        // Vendor bundle, only when the vendor directory exists.
        let vendor_src = src.join("vendor");
        if fs::try_exists(&vendor_src).await.unwrap_or(false) {
            ToolCommand::new("vendor-bundle", &self.cfg.tools.vendor_bundle)
                .run(&[
                    ("src", &vendor_src.to_string_lossy()),
                    ("dest", &dest_dir.to_string_lossy()),
                ])
                .await?;
        } else {
            debug!(?vendor_src, "no vendor directory; skipping vendor bundle");
        }

        Ok(())
    }
}
