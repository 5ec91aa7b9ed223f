// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `pulldag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pulldag",
    version,
    about = "Sync declared build outputs with a remote content store.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PULLDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Retrieve available precomputed outputs from remote storage.
    ///
    /// Remotes can be aliased in `[remotes]` by mapping names to storage
    /// addresses; an unknown name is used as a literal address.
    Pull {
        /// Name or address of remote storage.
        #[arg(value_name = "REMOTE", default_value = "default")]
        remote: String,

        /// Location of the project directory. Defaults to the current
        /// working directory.
        #[arg(value_name = "PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
    },

    /// Upload locally-present outputs to remote storage.
    Push {
        /// Name or address of remote storage.
        #[arg(value_name = "REMOTE", default_value = "default")]
        remote: String,

        /// Location of the project directory. Defaults to the current
        /// working directory.
        #[arg(value_name = "PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
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
