// src/watch/rules.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::ConfigFile;
use crate::paths::PathResolver;
use crate::pipeline::TaskKind;
use crate::serve::ReloadKind;

/// One watch rule: a named asset category, its compiled glob patterns, the
/// task chain to re-run on change, and the reload granularity to announce
/// afterwards.
///
/// Patterns of different rules may overlap (the catch-all source-files rule
/// deliberately covers fonts, images and icons too); overlapping triggers
/// are redundant but safe work, since every chain is idempotent.
#[derive(Clone)]
pub struct WatchRule {
    pub name: &'static str,
    pub chain: Vec<TaskKind>,
    pub reload: Option<ReloadKind>,
    globs: GlobSet,
}

impl fmt::Debug for WatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchRule")
            .field("name", &self.name)
            .field("chain", &self.chain)
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

impl WatchRule {
    fn new(
        name: &'static str,
        patterns: &[String],
        chain: Vec<TaskKind>,
        reload: Option<ReloadKind>,
    ) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid watch pattern for rule '{name}': {pattern}"))?;
            builder.add(glob);
        }
        Ok(Self {
            name,
            chain,
            reload,
            globs: builder.build()?,
        })
    }

    /// Returns true if this rule is interested in the given root-relative
    /// path, e.g. `"source/css/base.scss"`.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.globs.is_match(rel_path)
    }
}

/// Build the watch rules for every asset category.
///
/// `template_extensions` comes from the pattern engine; the catch-all
/// source-files rule derives one pattern glob per recognized extension.
pub fn build_watch_rules(
    cfg: &ConfigFile,
    resolver: &PathResolver,
    template_extensions: &[String],
) -> Result<Vec<WatchRule>> {
    let source = &cfg.paths.source;

    let mut rules = Vec::new();

    rules.push(WatchRule::new(
        "styles",
        &[resolver.resolve(&[source.css.as_str(), "**", "*.scss"])],
        vec![TaskKind::CompileStyles, TaskKind::PrefixStyles],
        Some(ReloadKind::Css),
    )?);

    rules.push(WatchRule::new(
        "sprite-css",
        &[resolver.resolve(&[source.css.as_str(), "svg-sprite.css"])],
        vec![TaskKind::CopySpriteCss],
        Some(ReloadKind::Css),
    )?);

    rules.push(WatchRule::new(
        "scaffolding-css",
        &[resolver.resolve(&[source.css.as_str(), "pattern-scaffolding.css"])],
        vec![TaskKind::CopyScaffoldingCss],
        Some(ReloadKind::Css),
    )?);

    rules.push(WatchRule::new(
        "images",
        &[resolver.resolve(&[source.images.as_str(), "**", "*"])],
        vec![TaskKind::CopyImages],
        None,
    )?);

    rules.push(WatchRule::new(
        "icons",
        &[resolver.resolve(&[source.icons.as_str(), "**", "*.svg"])],
        vec![TaskKind::BuildSprite],
        None,
    )?);

    rules.push(WatchRule::new(
        "scripts",
        &[resolver.resolve(&[source.js.as_str(), "**", "*.js"])],
        vec![TaskKind::BundleScripts],
        Some(ReloadKind::Js),
    )?);

    rules.push(WatchRule::new(
        "styleguide",
        &[resolver.resolve(&[source.styleguide.as_str(), "**", "*"])],
        vec![TaskKind::CopyStyleguide, TaskKind::CopyStyleguideCss],
        Some(ReloadKind::Css),
    )?);

    // Catch-all: anything that feeds the pattern engine re-runs the engine
    // build and reloads the page. Asset tasks must stay out of this chain:
    // variable extraction writes JSON under the pattern tree, which these
    // very globs match, so including it would make the rule trigger itself.
    let mut source_files = vec![
        resolver.resolve(&[source.patterns.as_str(), "**", "*.json"]),
        resolver.resolve(&[source.patterns.as_str(), "**", "*.md"]),
        resolver.resolve(&[source.data.as_str(), "**", "*.json"]),
        resolver.resolve(&[source.fonts.as_str(), "**", "*"]),
        resolver.resolve(&[source.images.as_str(), "**", "*"]),
        resolver.resolve(&[source.icons.as_str(), "**", "*"]),
        resolver.resolve(&[source.meta.as_str(), "**", "*"]),
        resolver.resolve(&[source.annotations.as_str(), "**", "*"]),
    ];
    for ext in template_extensions {
        let pattern = format!("*{ext}");
        source_files.push(resolver.resolve(&[
            source.patterns.as_str(),
            "**",
            pattern.as_str(),
        ]));
    }

    rules.push(WatchRule::new(
        "source-files",
        &source_files,
        vec![TaskKind::BuildPatterns],
        Some(ReloadKind::Full),
    )?);

    Ok(rules)
}
