//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, InitCommand, ResolveCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving environment-layered build configuration.
#[derive(Parser)]
#[command(name = "buildconf")]
#[command(
    version,
    about = "Resolve environment-layered build configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use this configuration directory instead of searching for one
    #[arg(long, value_name = "PATH", global = true, env = "BUILDCONF_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the final configuration for an environment
    Resolve(ResolveCommand),

    /// Validate a single configuration file
    Validate(ValidateCommand),

    /// Write starter configuration files
    Init(InitCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
