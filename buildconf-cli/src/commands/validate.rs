//! Command to validate a single configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use buildconf::{ConfigLoader, ConfigValidator};
use clap::Args;
use std::path::PathBuf;

/// Validate a single configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate as a final record, so required keys must be present
    #[arg(long = "final")]
    pub final_record: bool,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.file.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.file.display()
            )));
        }

        // Parse errors surface as configuration errors (exit 7)
        let record = ConfigLoader::load_file(&self.file)?;

        let outcome = if self.final_record {
            ConfigValidator::validate(&record)
        } else {
            ConfigValidator::validate_overlay(&record)
        };

        match outcome {
            Ok(()) => {
                if !global.quiet {
                    println!("Configuration is valid");
                }
                Ok(())
            }
            Err(e) if e.is_validation() => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
