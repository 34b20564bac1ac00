//! Builder for loading, validating and resolving a configuration.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::BuildEnvironment;
use crate::config::loader::{ConfigLoader, ConfigSource, SourceKind};
use crate::config::resolver::ConfigResolver;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use crate::record::ConfigRecord;

/// The outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// The environment whose overlay was applied.
    pub environment: BuildEnvironment,
    /// The final merged record.
    pub record: ConfigRecord,
    /// Every source that took part, base first. Programmatic records have
    /// an empty path.
    pub sources: Vec<ConfigSource>,
}

/// Builder for resolving a configuration.
///
/// # Examples
///
/// ```
/// use buildconf::{BuildEnvironment, ConfigBuilder, ConfigRecord};
/// use serde_json::json;
///
/// let base = ConfigRecord::from_value(json!({
///     "projectName": "demo",
///     "sourceRoot": "src",
///     "outputRoot": "dist",
///     "cache": {"enable": false}
/// }))
/// .unwrap();
/// let dev = ConfigRecord::from_value(json!({"cache": {"enable": true}})).unwrap();
///
/// let resolved = ConfigBuilder::new()
///     .with_base(base)
///     .with_overlay(BuildEnvironment::Development, dev)
///     .with_overlay(BuildEnvironment::Production, ConfigRecord::new())
///     .with_environment(BuildEnvironment::Development)
///     .build()
///     .unwrap();
///
/// assert_eq!(resolved.record.get_path("cache.enable"), Some(&json!(true)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    environment: Option<BuildEnvironment>,
    base: Option<ConfigRecord>,
    development: Option<ConfigRecord>,
    production: Option<ConfigRecord>,
    skip_validation: bool,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load files from this directory instead of discovering one.
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Start directory discovery here instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Select the environment explicitly.
    ///
    /// Without this, `build` reads `NODE_ENV` once.
    #[must_use]
    pub fn with_environment(mut self, environment: BuildEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Use this base record instead of the `index` file.
    #[must_use]
    pub fn with_base(mut self, base: ConfigRecord) -> Self {
        self.base = Some(base);
        self
    }

    /// Use this overlay instead of the `dev` or `prod` file.
    #[must_use]
    pub fn with_overlay(mut self, environment: BuildEnvironment, overlay: ConfigRecord) -> Self {
        match environment {
            BuildEnvironment::Development => self.development = Some(overlay),
            BuildEnvironment::Production => self.production = Some(overlay),
        }
        self
    }

    /// Skip schema validation of the sources and the final record.
    #[must_use]
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// Load, validate and resolve.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no configuration directory can be
    /// found or a file fails to load, and a validation error if a source or
    /// the final record breaks the schema.
    pub fn build(self) -> Result<ResolvedConfig> {
        let environment = self.environment.unwrap_or_else(BuildEnvironment::from_env);
        let sources = self.collect_sources()?;

        if !self.skip_validation {
            for source in &sources {
                ConfigValidator::validate_overlay(&source.record).inspect_err(|_| {
                    log::debug!("Validation failed for {} ({})", source.path.display(), source.kind);
                })?;
            }
        }

        let [base, development, production] = &sources;
        let resolver = ConfigResolver::new(
            base.record.clone(),
            development.record.clone(),
            production.record.clone(),
        );
        let record = resolver.resolve(environment);

        if !self.skip_validation {
            ConfigValidator::validate(&record)?;
        }

        log::debug!(
            "Resolved {} configuration with {} top-level keys",
            environment,
            record.len()
        );

        Ok(ResolvedConfig {
            environment,
            record,
            sources: Vec::from(sources),
        })
    }

    fn collect_sources(&self) -> Result<[ConfigSource; 3]> {
        let mut dir: Option<PathBuf> = None;
        let mut load = |kind: SourceKind, record: &Option<ConfigRecord>| -> Result<ConfigSource> {
            if let Some(record) = record {
                return Ok(ConfigSource {
                    path: PathBuf::new(),
                    kind,
                    record: record.clone(),
                });
            }
            let dir = match &dir {
                Some(dir) => dir.clone(),
                None => dir.insert(self.resolve_config_dir()?).clone(),
            };
            ConfigLoader::load_kind(&dir, kind)
        };

        Ok([
            load(SourceKind::Base, &self.base)?,
            load(SourceKind::Overlay(BuildEnvironment::Development), &self.development)?,
            load(SourceKind::Overlay(BuildEnvironment::Production), &self.production)?,
        ])
    }

    fn resolve_config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }

        let start = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };

        ConfigLoader::discover_config_dir(&start).ok_or_else(|| Error::Configuration {
            path: start,
            message: "No configuration directory found".into(),
        })
    }
}
