// src/errors.rs

//! Crate-wide error types.
//!
//! Most of the crate propagates `anyhow::Result` with context; the enum below
//! covers the cases callers may want to tell apart (startup configuration
//! problems, external tool failures, engine failures).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("tool '{tool}' exited with status {code}")]
    ToolFailed { tool: String, code: i32 },

    #[error("pattern engine command '{command}' exited with status {code}")]
    EngineFailed { command: String, code: i32 },
}

pub use anyhow::{Error, Result};
