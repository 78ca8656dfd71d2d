// src/exec.rs

//! External tool execution.
//!
//! The compilers in this pipeline (stylesheet compiler, prefixer, sprite
//! compiler, minifier) and the pattern engine are external programs. This
//! module runs their configured command templates through the platform
//! shell with `tokio::process`, drains their output, and maps non-zero
//! exit codes to task failures.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::PipelineError;

/// A configured command template for one external tool.
///
/// Placeholders of the form `{src}`, `{dest}`, `{file}` are substituted
/// before the command is handed to the shell.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    name: String,
    template: String,
}

impl ToolCommand {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Substitute `{key}` placeholders into the template.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        let mut cmd = self.template.clone();
        for (key, value) in substitutions {
            cmd = cmd.replace(&format!("{{{key}}}"), value);
        }
        cmd
    }

    /// Run the rendered command to completion.
    ///
    /// Stdout and stderr are drained and logged at debug so OS pipe buffers
    /// never fill. A non-zero exit becomes [`PipelineError::ToolFailed`].
    pub async fn run(&self, substitutions: &[(&str, &str)]) -> Result<()> {
        let rendered = self.render(substitutions);
        info!(tool = %self.name, cmd = %rendered, "running tool");

        let status = run_shell(&self.name, &rendered).await?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(PipelineError::ToolFailed {
                tool: self.name.clone(),
                code,
            }
            .into());
        }

        debug!(tool = %self.name, "tool finished");
        Ok(())
    }
}

/// Build a command that runs `command_line` through the platform shell.
pub(crate) fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}

/// Run one shell command line, draining stdout/stderr into debug logs.
async fn run_shell(label: &str, command_line: &str) -> Result<std::process::ExitStatus> {
    let mut cmd = shell_command(command_line);

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for '{label}'"))?;

    if let Some(stdout) = child.stdout.take() {
        let label = label.to_string();
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(tool = %label, "stdout: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        let label = label.to_string();
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(tool = %label, "stderr: {}", line);
            }
        });
    }

    child
        .wait()
        .await
        .with_context(|| format!("waiting for process of '{label}'"))
}
