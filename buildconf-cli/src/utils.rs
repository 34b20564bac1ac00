//! Utility functions for CLI operations.

use crate::error::CliError;
use std::env;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
///
/// Verbosity flags are applied to the logger in `main` before dispatch;
/// only `quiet` is consulted again, to silence command output on stdout.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the configuration directory location.
    pub config_dir: Option<PathBuf>,
}

/// Resolve a path against the current directory.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let cwd = env::current_dir()?;
    Ok(match path {
        Some(p) if p.is_absolute() => p,
        Some(p) => cwd.join(p),
        None => cwd,
    })
}

/// Project name derived from a directory: its final component.
pub fn default_project_name(dir: &std::path::Path) -> Option<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty())
}
