//! Command to print the final configuration for an environment.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use buildconf::{BuildContext, BuildEnvironment, ConfigBuilder};
use clap::{Args, ValueEnum};

/// Output format for the resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Print the final configuration for an environment.
#[derive(Args)]
pub struct ResolveCommand {
    /// Environment indicator; only "development" selects the development overlay
    #[arg(long, value_name = "ENV", env = "NODE_ENV")]
    pub env: Option<String>,

    /// Host command the configuration is resolved for
    #[arg(long, value_name = "CMD", default_value = "build")]
    pub command: String,

    /// Host mode (defaults to the environment name)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Skip schema validation
    #[arg(long)]
    pub no_validate: bool,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let environment = BuildEnvironment::from_indicator(self.env.as_deref().unwrap_or_default());
        let mode = self
            .mode
            .unwrap_or_else(|| environment.as_str().to_string());
        let ctx = BuildContext::new(self.command, mode);

        log::info!("Resolving {environment} configuration for {ctx}");

        let mut builder = ConfigBuilder::new().with_environment(environment);
        if let Some(dir) = &global.config_dir {
            builder = builder.with_config_dir(dir);
        }
        if self.no_validate {
            builder = builder.skip_validation();
        }

        let resolved = builder.build()?;
        for source in &resolved.sources {
            log::info!("Loaded {} from {}", source.kind, source.path.display());
        }

        match self.format {
            OutputFormat::Json => println!("{}", resolved.record.to_json_pretty()?),
            OutputFormat::Yaml => print!("{}", resolved.record.to_yaml()?),
        }

        Ok(())
    }
}
