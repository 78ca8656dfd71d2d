// src/config/mod.rs

//! Configuration loading and validation for patternpipe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty path roles (`validate.rs`).
//!
//! The loaded [`ConfigFile`] is constructed once at process entry and handed
//! by `Arc` into every component constructor; nothing reads configuration
//! through ambient global state.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, EngineSection, ExportSection, ExtractRule, PathsSection, PublicPaths,
    ScriptsSection, ServeSection, SourcePaths, StylesSection, ToolsSection, WatchSection,
};
pub use validate::validate_config;
