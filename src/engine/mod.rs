// src/engine/mod.rs

//! Façade over the external pattern-library engine.
//!
//! The engine renders the pattern source tree into the navigable style-guide
//! output. [`PatternEngine`] describes the operations the orchestrator and
//! CLI depend on; [`CliEngine`] is the subprocess-backed implementation.
//!
//! Every operation is exposed as a future, so callers never need to care
//! whether a particular engine version completes synchronously or
//! asynchronously; the adapter normalizes that here.

pub mod cli;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub use cli::CliEngine;

/// Contract with the external pattern-library engine.
///
/// Failures surface verbatim from the engine; the adapter neither swallows
/// nor reinterprets them.
pub trait PatternEngine: Send + Sync {
    /// Render all patterns into the output tree, optionally purging prior
    /// output first.
    fn build(&self, clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Render patterns without the full asset pipeline.
    fn patterns_only(&self, clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Print the engine version for the operator.
    fn version(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Print the engine's own help text for the operator.
    fn help(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// List starter kits available for installation.
    fn list_starter_kits(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Fetch and install a named starter kit into the source tree.
    fn load_starter_kit<'a>(
        &'a self,
        kit: &'a str,
        clean: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Install a named plugin package affecting subsequent builds.
    fn install_plugin<'a>(
        &'a self,
        plugin: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Template file extensions the engine recognizes (with leading dot).
    /// Used to derive watch globs for the catch-all source-files rule.
    fn template_extensions(&self) -> Vec<String>;
}
