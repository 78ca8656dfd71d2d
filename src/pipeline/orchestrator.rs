// src/pipeline/orchestrator.rs

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use crate::assets::{AssetCopier, ScriptBundler, SpriteBuilder, StyleTransformer};
use crate::config::ConfigFile;
use crate::engine::PatternEngine;
use crate::export::Exporter;
use crate::pipeline::graph::{TaskGraph, TaskGraphBuilder, TaskKind};
use crate::pipeline::runner::TaskExecutor;

/// Dispatches task kinds onto the concrete asset components and the engine.
pub struct Pipeline {
    copier: AssetCopier,
    styles: StyleTransformer,
    sprite: SpriteBuilder,
    scripts: ScriptBundler,
    engine: Arc<dyn PatternEngine>,
    clean_public: bool,
}

impl Pipeline {
    pub fn new(
        cfg: Arc<ConfigFile>,
        root: impl Into<PathBuf>,
        engine: Arc<dyn PatternEngine>,
    ) -> Self {
        let root = root.into();
        Self {
            copier: AssetCopier::new(Arc::clone(&cfg), &root),
            styles: StyleTransformer::new(Arc::clone(&cfg), &root),
            sprite: SpriteBuilder::new(Arc::clone(&cfg), &root),
            scripts: ScriptBundler::new(Arc::clone(&cfg), &root),
            engine,
            clean_public: cfg.clean_public,
        }
    }
}

impl TaskExecutor for Pipeline {
    fn execute(&self, kind: TaskKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            match kind {
                TaskKind::CopyImages => self.copier.copy_images().await,
                TaskKind::CopyFavicon => self.copier.copy_favicon().await,
                TaskKind::CopyFonts => self.copier.copy_fonts().await,
                TaskKind::BuildSprite => self.sprite.build().await,
                TaskKind::CompileStyles => self.styles.compile().await,
                TaskKind::PrefixStyles => self.styles.prefix().await,
                TaskKind::ExtractStyleVariables => self.styles.extract_variables().await,
                TaskKind::CopyStyleguide => self.copier.copy_styleguide().await,
                TaskKind::CopyStyleguideCss => self.copier.copy_styleguide_css().await,
                TaskKind::CopySpriteCss => self.copier.copy_sprite_css().await,
                TaskKind::CopyScaffoldingCss => self.copier.copy_scaffolding_css().await,
                TaskKind::BundleScripts => self.scripts.bundle().await,
                TaskKind::BuildPatterns => self.engine.build(self.clean_public).await,
            }
        })
    }
}

/// Composes the asset components and the pattern engine into the full-build
/// task graph and exposes the top-level entry points.
pub struct BuildOrchestrator {
    cfg: Arc<ConfigFile>,
    root: PathBuf,
    pipeline: Arc<Pipeline>,
    graph: TaskGraph,
    exporter: Exporter,
}

impl BuildOrchestrator {
    pub fn new(
        cfg: Arc<ConfigFile>,
        root: impl Into<PathBuf>,
        engine: Arc<dyn PatternEngine>,
    ) -> Result<Self> {
        let root = root.into();
        let pipeline = Arc::new(Pipeline::new(Arc::clone(&cfg), &root, engine));
        let graph = full_build_graph()?;
        let exporter = Exporter::new(Arc::clone(&cfg), &root);

        Ok(Self {
            cfg,
            root,
            pipeline,
            graph,
            exporter,
        })
    }

    /// Execute the complete build: asset copies, sprite, styles, styleguide,
    /// bundles, then the pattern engine build with the configured clean
    /// policy. All-or-nothing from the caller's perspective.
    pub async fn run_full_build(&self) -> Result<()> {
        info!(tasks = self.graph.len(), "starting full build");
        self.graph
            .run(Arc::clone(&self.pipeline) as Arc<dyn TaskExecutor>)
            .await?;
        info!("full build finished");
        Ok(())
    }

    /// Full build, then publish the rendered output into the external
    /// style-guide project.
    pub async fn run_export(&self) -> Result<()> {
        self.run_full_build().await?;
        self.exporter.export().await
    }

    /// Purge the output directory.
    pub async fn clean(&self) -> Result<()> {
        let public_root = self.root.join(&self.cfg.paths.public.root);
        if fs::try_exists(&public_root).await.unwrap_or(false) {
            fs::remove_dir_all(&public_root)
                .await
                .with_context(|| format!("purging output directory {:?}", public_root))?;
        }
        fs::create_dir_all(&public_root)
            .await
            .with_context(|| format!("recreating output directory {:?}", public_root))?;
        info!(?public_root, "output directory purged");
        Ok(())
    }

    /// Run a linear chain of tasks in order. Used by watch rules, whose
    /// chains are sequential subsets of the full graph.
    pub async fn run_chain(&self, tasks: &[TaskKind]) -> Result<()> {
        for kind in tasks {
            self.pipeline.execute(*kind).await?;
        }
        Ok(())
    }

    /// Print the task graph in dependency order without executing anything.
    pub fn print_dry_run(&self) {
        println!("patternpipe dry-run");
        println!("  clean_public = {}", self.cfg.clean_public);
        println!();
        println!("tasks ({}):", self.graph.len());

        for idx in self.graph.graph.node_indices() {
            let kind = self.graph.graph[idx];
            let deps = self.graph.dependency_names(idx);
            if deps.is_empty() {
                println!("  - {}", kind.name());
            } else {
                println!("  - {} (after: {})", kind.name(), deps.join(", "));
            }
        }

        println!();
        let order: Vec<&str> = self.graph.topo_order().map(|k| k.name()).collect();
        println!("execution order: {}", order.join(" -> "));
    }
}

/// The full-build graph, mirroring the declared phase ordering:
/// copies and the sprite are independent roots, the style chain is
/// sequential, styleguide css follows the raw styleguide copy, and the
/// engine build depends on everything.
pub fn full_build_graph() -> Result<TaskGraph> {
    let mut b = TaskGraphBuilder::new();

    let images = b.add(TaskKind::CopyImages, &[]);
    let favicon = b.add(TaskKind::CopyFavicon, &[]);
    let fonts = b.add(TaskKind::CopyFonts, &[]);
    let sprite = b.add(TaskKind::BuildSprite, &[]);

    let compile = b.add(TaskKind::CompileStyles, &[]);
    let prefix = b.add(TaskKind::PrefixStyles, &[compile]);
    // Extraction reads the style sources, not the prefixed output; it is
    // chained after prefixing only to keep the run deterministic.
    let extract = b.add(TaskKind::ExtractStyleVariables, &[prefix]);

    let styleguide = b.add(TaskKind::CopyStyleguide, &[]);
    let styleguide_css = b.add(TaskKind::CopyStyleguideCss, &[styleguide]);

    // The sprite tool regenerates the companion stylesheet the copy
    // publishes, so the copy must wait for it.
    let sprite_css = b.add(TaskKind::CopySpriteCss, &[sprite]);
    let bundle = b.add(TaskKind::BundleScripts, &[]);

    b.add(
        TaskKind::BuildPatterns,
        &[
            images,
            favicon,
            fonts,
            sprite,
            extract,
            styleguide_css,
            sprite_css,
            bundle,
        ],
    );

    b.build()
}
