// src/engine/cli.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::ConfigFile;
use crate::engine::PatternEngine;
use crate::exec::shell_command;
use crate::errors::{PipelineError, Result};

/// Subprocess-backed pattern engine.
///
/// Each operation shells out to the configured engine command with the
/// matching subcommand. Engine output goes straight to the operator's
/// terminal; a non-zero exit becomes [`PipelineError::EngineFailed`].
#[derive(Debug, Clone)]
pub struct CliEngine {
    cfg: Arc<ConfigFile>,
}

impl CliEngine {
    pub fn new(cfg: Arc<ConfigFile>) -> Self {
        Self { cfg }
    }

    async fn invoke(&self, args: &[&str]) -> Result<()> {
        let command_line = format!("{} {}", self.cfg.engine.command, args.join(" "));
        info!(cmd = %command_line, "invoking pattern engine");

        // The engine talks to the operator directly; no capture.
        let status = shell_command(&command_line)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("spawning pattern engine: {command_line}"))?;

        if !status.success() {
            return Err(PipelineError::EngineFailed {
                command: command_line,
                code: status.code().unwrap_or(-1),
            }
            .into());
        }

        Ok(())
    }
}

impl PatternEngine for CliEngine {
    fn build(&self, clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            if clean {
                self.invoke(&["build", "--clean"]).await
            } else {
                self.invoke(&["build"]).await
            }
        })
    }

    fn patterns_only(&self, clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            if clean {
                self.invoke(&["patternsonly", "--clean"]).await
            } else {
                self.invoke(&["patternsonly"]).await
            }
        })
    }

    fn version(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.invoke(&["version"]).await })
    }

    fn help(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.invoke(&["help"]).await })
    }

    fn list_starter_kits(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.invoke(&["liststarterkits"]).await })
    }

    fn load_starter_kit<'a>(
        &'a self,
        kit: &'a str,
        clean: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if clean {
                self.invoke(&["loadstarterkit", kit, "--clean"]).await
            } else {
                self.invoke(&["loadstarterkit", kit]).await
            }
        })
    }

    fn install_plugin<'a>(
        &'a self,
        plugin: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move { self.invoke(&["installplugin", plugin]).await })
    }

    fn template_extensions(&self) -> Vec<String> {
        self.cfg.engine.template_extensions.clone()
    }
}
