//! Environment-conditional composition of the final record.

use crate::config::environment::BuildEnvironment;
use crate::config::loader::{ConfigLoader, LoadedConfig};
use crate::config::merger::ConfigMerger;
use crate::error::Result;
use crate::record::ConfigRecord;
use std::path::Path;

/// Holds the base record and both overlays, and picks one overlay per call.
///
/// Resolution is pure: the environment is an argument, never read here.
///
/// # Examples
///
/// ```
/// use buildconf::{BuildEnvironment, ConfigRecord, ConfigResolver};
/// use serde_json::json;
///
/// let base = ConfigRecord::from_value(json!({"mini": {"cache": {"enable": false}}})).unwrap();
/// let dev = ConfigRecord::from_value(json!({"mini": {"cache": {"enable": true}}})).unwrap();
/// let resolver = ConfigResolver::new(base.clone(), dev, ConfigRecord::new());
///
/// let record = resolver.resolve(BuildEnvironment::Development);
/// assert_eq!(record.into_value(), json!({"mini": {"cache": {"enable": true}}}));
///
/// assert_eq!(resolver.resolve(BuildEnvironment::Production), base);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigResolver {
    base: ConfigRecord,
    development: ConfigRecord,
    production: ConfigRecord,
    environment: BuildEnvironment,
}

impl ConfigResolver {
    /// Creates a resolver from in-memory records.
    ///
    /// The stored environment, used when the resolver acts as a
    /// [`crate::host::ConfigFactory`], defaults to production.
    #[must_use]
    pub fn new(base: ConfigRecord, development: ConfigRecord, production: ConfigRecord) -> Self {
        Self {
            base,
            development,
            production,
            environment: BuildEnvironment::default(),
        }
    }

    /// Loads a resolver from a configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any of the three files is missing or
    /// malformed.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self::from(ConfigLoader::load_dir(dir)?))
    }

    /// Sets the environment used when acting as a factory.
    #[must_use]
    pub fn with_environment(mut self, environment: BuildEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// The environment used when acting as a factory.
    #[must_use]
    pub const fn environment(&self) -> BuildEnvironment {
        self.environment
    }

    /// The shared base record.
    #[must_use]
    pub const fn base(&self) -> &ConfigRecord {
        &self.base
    }

    /// The overlay selected for `env`.
    #[must_use]
    pub const fn overlay(&self, env: BuildEnvironment) -> &ConfigRecord {
        match env {
            BuildEnvironment::Development => &self.development,
            BuildEnvironment::Production => &self.production,
        }
    }

    /// Deep-merge the base record with the overlay for `env`.
    #[must_use]
    pub fn resolve(&self, env: BuildEnvironment) -> ConfigRecord {
        log::debug!("Resolving configuration for {env}");
        ConfigMerger::deep_merge(&self.base, self.overlay(env))
    }
}

impl From<LoadedConfig> for ConfigResolver {
    fn from(loaded: LoadedConfig) -> Self {
        Self::new(
            loaded.base.record,
            loaded.development.record,
            loaded.production.record,
        )
    }
}
