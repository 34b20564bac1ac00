//! Init command implementation.
//!
//! Writes a starter base record and the two environment overlays.

use crate::error::CliError;
use crate::utils::{default_project_name, resolve_path, GlobalOptions};
use buildconf::Template;
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;

/// Write starter configuration files.
#[derive(Parser)]
#[command(about = "Write starter configuration files")]
pub struct InitCommand {
    /// Directory to write into (defaults to --config-dir, then ./config)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Project name (defaults to the name of the project directory)
    #[arg(long, value_name = "NAME")]
    project_name: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > ./config
        let dir = resolve_path(Some(
            self.dir
                .or_else(|| global.config_dir.clone())
                .unwrap_or_else(|| PathBuf::from(buildconf::config::loader::CONFIG_DIR_NAME)),
        ))?;

        let project_name = match self.project_name {
            Some(name) => name,
            None => dir
                .parent()
                .and_then(default_project_name)
                .ok_or_else(|| {
                    CliError::InvalidArguments(
                        "Could not derive a project name (use --project-name)".to_string(),
                    )
                })?,
        };

        let date = Local::now().format("%Y-%-m-%-d").to_string();
        let written = Template::new(project_name, date).write_to(&dir, self.force)?;

        if !global.quiet {
            for path in &written {
                println!("Created {}", path.display());
            }
        }

        Ok(())
    }
}
