// src/assets/copy.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tokio::fs;
use tracing::{debug, info};

use crate::config::ConfigFile;

/// Copies specific file classes from the source tree to the output tree.
///
/// Missing source directories are treated as "nothing to copy" rather than
/// errors, matching how a glob with no matches behaves.
#[derive(Debug, Clone)]
pub struct AssetCopier {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
}

impl AssetCopier {
    pub fn new(cfg: Arc<ConfigFile>, root: impl Into<PathBuf>) -> Self {
        Self {
            cfg,
            root: root.into(),
        }
    }

    fn path(&self, role: &str) -> PathBuf {
        self.root.join(role)
    }

    pub async fn copy_images(&self) -> Result<()> {
        let copied = copy_tree(
            &self.path(&self.cfg.paths.source.images),
            &self.path(&self.cfg.paths.public.images),
            None,
            None,
            false,
        )
        .await?;
        info!(copied, "copied image files");
        Ok(())
    }

    pub async fn copy_fonts(&self) -> Result<()> {
        let copied = copy_tree(
            &self.path(&self.cfg.paths.source.fonts),
            &self.path(&self.cfg.paths.public.fonts),
            None,
            None,
            false,
        )
        .await?;
        info!(copied, "copied font files");
        Ok(())
    }

    pub async fn copy_favicon(&self) -> Result<()> {
        let src = self.path(&self.cfg.paths.source.root).join("favicon.ico");
        let dest_dir = self.path(&self.cfg.paths.public.root);
        copy_file_into(&src, &dest_dir).await
    }

    /// Copy the sprite companion stylesheet from the source css directory.
    pub async fn copy_sprite_css(&self) -> Result<()> {
        let src = self.path(&self.cfg.paths.source.css).join("svg-sprite.css");
        let dest_dir = self.path(&self.cfg.paths.public.css);
        copy_file_into(&src, &dest_dir).await
    }

    /// Copy the pattern scaffolding stylesheet from the source css directory.
    pub async fn copy_scaffolding_css(&self) -> Result<()> {
        let src = self
            .path(&self.cfg.paths.source.css)
            .join("pattern-scaffolding.css");
        let dest_dir = self.path(&self.cfg.paths.public.css);
        copy_file_into(&src, &dest_dir).await
    }

    /// Copy styleguide files (everything but css) into the public root,
    /// preserving directory structure.
    pub async fn copy_styleguide(&self) -> Result<()> {
        let exclude = single_glob("**/*.css")?;
        let copied = copy_tree(
            &self.path(&self.cfg.paths.source.styleguide),
            &self.path(&self.cfg.paths.public.root),
            None,
            Some(&exclude),
            false,
        )
        .await?;
        info!(copied, "copied styleguide files");
        Ok(())
    }

    /// Copy styleguide css, flattened into a single output directory.
    pub async fn copy_styleguide_css(&self) -> Result<()> {
        let include = single_glob("**/*.css")?;
        let dest = self.path(&self.cfg.paths.public.styleguide).join("css");
        let copied = copy_tree(
            &self.path(&self.cfg.paths.source.styleguide),
            &dest,
            Some(&include),
            None,
            true,
        )
        .await?;
        info!(copied, "copied styleguide css (flattened)");
        Ok(())
    }
}

fn single_glob(pattern: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?);
    Ok(builder.build()?)
}

/// Copy one file into a directory, keeping its name.
///
/// A missing source is a no-op: optional inputs like `favicon.ico` or
/// `svg-sprite.css` may legitimately be absent.
pub async fn copy_file_into(src: &Path, dest_dir: &Path) -> Result<()> {
    if !fs::try_exists(src).await.unwrap_or(false) {
        debug!(?src, "source file absent; skipping copy");
        return Ok(());
    }

    let name = src
        .file_name()
        .with_context(|| format!("source path has no file name: {:?}", src))?;

    fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("creating output directory {:?}", dest_dir))?;

    let dest = dest_dir.join(name);
    fs::copy(src, &dest)
        .await
        .with_context(|| format!("copying {:?} to {:?}", src, dest))?;

    debug!(?src, ?dest, "copied file");
    Ok(())
}

/// Recursively copy files under `src` into `dest`.
///
/// Relative paths (forward slashes) are matched against `include` / `exclude`
/// glob sets when given. With `flatten = true` every matched file lands
/// directly in `dest` under its base name. Returns the number of files
/// copied; a missing `src` yields zero.
pub async fn copy_tree(
    src: &Path,
    dest: &Path,
    include: Option<&GlobSet>,
    exclude: Option<&GlobSet>,
    flatten: bool,
) -> Result<u64> {
    if !fs::try_exists(src).await.unwrap_or(false) {
        debug!(?src, "source tree absent; nothing to copy");
        return Ok(0);
    }

    let mut copied = 0u64;
    let mut stack = vec![src.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut entries = fs::read_dir(&dir)
            .await
            .with_context(|| format!("reading directory {:?}", dir))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;

            if file_type.is_dir() {
                stack.push(path);
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let rel = path
                .strip_prefix(src)
                .with_context(|| format!("relativizing {:?} against {:?}", path, src))?;
            let rel_str = rel.to_string_lossy().replace('\\', "/");

            if let Some(include) = include {
                if !include.is_match(&rel_str) {
                    continue;
                }
            }
            if let Some(exclude) = exclude {
                if exclude.is_match(&rel_str) {
                    continue;
                }
            }

            let target = if flatten {
                match path.file_name() {
                    Some(name) => dest.join(name),
                    None => continue,
                }
            } else {
                dest.join(rel)
            };

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating output directory {:?}", parent))?;
            }

            fs::copy(&path, &target)
                .await
                .with_context(|| format!("copying {:?} to {:?}", path, target))?;
            copied += 1;
        }
    }

    Ok(copied)
}
