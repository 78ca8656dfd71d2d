// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `patternpipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "patternpipe",
    version,
    about = "Build, watch and serve a pattern-library site and its frontend assets.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Patternpipe.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Patternpipe.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PATTERNPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the full asset + pattern build once.
    Build {
        /// Print the task graph in dependency order without executing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Full build, then rebuild changed asset categories on file changes.
    Watch,

    /// Full build, watch, and serve the output directory with live reload.
    Serve,

    /// Full build, then export the rendered output into the external
    /// style-guide project.
    Export,

    /// Purge the output directory.
    Clean,

    /// Render patterns only, without the asset pipeline.
    PatternsOnly,

    /// Print the pattern engine version.
    Version,

    /// Print the pattern engine's own help text.
    EngineHelp,

    /// List starter kits available from the pattern engine.
    ListStarterKits,

    /// Fetch and install a named starter kit into the source tree.
    LoadStarterKit {
        /// Name of the starter kit to install.
        #[arg(long, value_name = "NAME")]
        kit: String,

        /// Clean the source tree before installing.
        #[arg(long)]
        clean: bool,
    },

    /// Install a named pattern engine plugin.
    InstallPlugin {
        /// Name of the plugin package.
        #[arg(long, value_name = "NAME")]
        plugin: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
