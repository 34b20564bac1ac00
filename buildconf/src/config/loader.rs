//! Configuration file discovery and loading.
//!
//! A configuration directory holds three files: `index` (the base record),
//! `dev` and `prod` (the overlays). Each may be written as YAML (`.yaml`,
//! `.yml`) or JSON (`.json`).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::environment::BuildEnvironment;
use crate::error::{Error, Result};
use crate::record::ConfigRecord;

/// File stem of the base record.
pub const BASE_STEM: &str = "index";

/// Name of the directory searched for during discovery.
pub const CONFIG_DIR_NAME: &str = "config";

/// Extensions tried, in order, when locating a file by stem.
pub const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Which role a loaded file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The shared base record, always applied.
    Base,
    /// Overlay for one environment.
    Overlay(BuildEnvironment),
}

impl SourceKind {
    /// File stem for this kind (`index`, `dev`, `prod`).
    #[must_use]
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Base => BASE_STEM,
            Self::Overlay(env) => env.overlay_stem(),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Overlay(env) => write!(f, "{env} overlay"),
        }
    }
}

/// A loaded configuration file.
///
/// # Examples
///
/// ```
/// use buildconf::config::{ConfigSource, SourceKind};
/// use buildconf::ConfigRecord;
/// use std::path::PathBuf;
///
/// let base = ConfigSource {
///     path: PathBuf::from("config/index.yaml"),
///     kind: SourceKind::Base,
///     record: ConfigRecord::new(),
/// };
/// assert_eq!(base.kind.stem(), "index");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    /// Path the record was read from.
    pub path: PathBuf,
    /// Role of the file.
    pub kind: SourceKind,
    /// Parsed record.
    pub record: ConfigRecord,
}

/// The three files of a configuration directory.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The base record.
    pub base: ConfigSource,
    /// The development overlay.
    pub development: ConfigSource,
    /// The production overlay.
    pub production: ConfigSource,
}

impl LoadedConfig {
    /// The overlay source for an environment.
    #[must_use]
    pub fn overlay(&self, env: BuildEnvironment) -> &ConfigSource {
        match env {
            BuildEnvironment::Development => &self.development,
            BuildEnvironment::Production => &self.production,
        }
    }

    /// All sources, base first.
    #[must_use]
    pub fn into_sources(self) -> Vec<ConfigSource> {
        vec![self.base, self.development, self.production]
    }
}

/// Loads configuration records from disk.
///
/// # Examples
///
/// ```no_run
/// use buildconf::config::ConfigLoader;
/// use std::path::Path;
///
/// let loaded = ConfigLoader::load_dir(Path::new("config")).unwrap();
/// println!("base has {} keys", loaded.base.record.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the base record and both overlays from a directory.
    ///
    /// All three files are required and all three are parsed, so a
    /// malformed overlay fails the load even if it would not be selected.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file is missing, unreadable or
    /// malformed.
    pub fn load_dir(dir: &Path) -> Result<LoadedConfig> {
        Ok(LoadedConfig {
            base: Self::load_kind(dir, SourceKind::Base)?,
            development: Self::load_kind(dir, SourceKind::Overlay(BuildEnvironment::Development))?,
            production: Self::load_kind(dir, SourceKind::Overlay(BuildEnvironment::Production))?,
        })
    }

    /// Load one role's file from a directory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing or malformed.
    pub fn load_kind(dir: &Path, kind: SourceKind) -> Result<ConfigSource> {
        let path = Self::find_file(dir, kind.stem()).ok_or_else(|| Error::Configuration {
            path: dir.join(format!("{}.{}", kind.stem(), EXTENSIONS[0])),
            message: format!(
                "Missing {kind} file (looked for {} with extension {})",
                kind.stem(),
                EXTENSIONS.join(", ")
            ),
        })?;

        let record = Self::load_file(&path)?;
        log::debug!("Loaded {kind} from {} ({} keys)", path.display(), record.len());

        Ok(ConfigSource { path, kind, record })
    }

    /// Locate `<stem>.yaml`, `<stem>.yml` or `<stem>.json` in `dir`.
    ///
    /// Returns the first existing file in that order.
    #[must_use]
    pub fn find_file(dir: &Path, stem: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{stem}.{ext}")))
            .find(|candidate| candidate.is_file())
    }

    /// Load and parse a single configuration file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    /// An empty document is an empty record.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, does not
    /// parse, or its root is not a mapping.
    pub fn load_file(path: &Path) -> Result<ConfigRecord> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Configuration {
            path: path.to_path_buf(),
            message: format!("Failed to read configuration file: {e}"),
        })?;

        Self::parse(path, &contents)
    }

    /// Parse configuration text, choosing the format from `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `path` on any parse failure.
    pub fn parse(path: &Path, contents: &str) -> Result<ConfigRecord> {
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

        let value: serde_json::Value = if contents.trim().is_empty() {
            serde_json::Value::Null
        } else if is_json {
            serde_json::from_str(contents).map_err(|e| Error::Configuration {
                path: path.to_path_buf(),
                message: format!("Invalid JSON: {e}"),
            })?
        } else {
            serde_yaml::from_str(contents).map_err(|e| Error::Configuration {
                path: path.to_path_buf(),
                message: format!("Invalid YAML: {e}"),
            })?
        };

        ConfigRecord::from_value(value).map_err(|e| Error::Configuration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Find a configuration directory by walking up from `start_dir`.
    ///
    /// Checks `start_dir` itself, then `<dir>/config`, for a base file at
    /// each level. Stops at the first match.
    #[must_use]
    pub fn discover_config_dir(start_dir: &Path) -> Option<PathBuf> {
        if Self::find_file(start_dir, BASE_STEM).is_some()
            && start_dir.file_name().and_then(|n| n.to_str()) == Some(CONFIG_DIR_NAME)
        {
            return Some(start_dir.to_path_buf());
        }

        let mut current = start_dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_DIR_NAME);
            if Self::find_file(&candidate, BASE_STEM).is_some() {
                log::debug!("Discovered configuration directory {}", candidate.display());
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_dir(dir: &Path, base: &str, dev: &str, prod: &str) {
        fs::write(dir.join("index.yaml"), base).unwrap();
        fs::write(dir.join("dev.yaml"), dev).unwrap();
        fs::write(dir.join("prod.yaml"), prod).unwrap();
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = ConfigLoader::load_file(Path::new("/nonexistent/path/index.yaml")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "invalid: yaml: syntax:").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(err.is_configuration());
        assert!(format!("{err}").contains("Invalid YAML"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{\"mini\": ").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(format!("{err}").contains("Invalid JSON"));
    }

    #[test]
    fn test_load_non_mapping_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.yaml");
        fs::write(&path, "- a\n- b\n").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(err.is_configuration());
        assert!(format!("{err}").contains("expected a mapping"));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prod.yaml");
        fs::write(&path, "\n").unwrap();

        assert!(ConfigLoader::load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_yaml_with_numeric_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.yaml");
        fs::write(&path, "deviceRatio:\n  \"640\": 1.17\n  \"750\": 1\n").unwrap();

        let record = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(record.get_path("deviceRatio.750"), Some(&json!(1)));
    }

    #[test]
    fn test_load_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dev.json");
        fs::write(&path, r#"{"mini": {"cache": {"enable": true}}}"#).unwrap();

        let record = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(record.get_path("mini.cache.enable"), Some(&json!(true)));
    }

    #[test]
    fn test_find_file_prefers_yaml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("dev.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("dev.yaml"), "").unwrap();

        let found = ConfigLoader::find_file(temp_dir.path(), "dev").unwrap();
        assert_eq!(found, temp_dir.path().join("dev.yaml"));
        assert!(ConfigLoader::find_file(temp_dir.path(), "prod").is_none());
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_dir(
            temp_dir.path(),
            "projectName: demo\n",
            "env:\n  NODE_ENV: '\"development\"'\n",
            "",
        );

        let loaded = ConfigLoader::load_dir(temp_dir.path()).unwrap();
        assert_eq!(loaded.base.kind, SourceKind::Base);
        assert_eq!(loaded.base.record.get("projectName"), Some(&json!("demo")));
        assert_eq!(
            loaded.overlay(BuildEnvironment::Development).record.get_path("env.NODE_ENV"),
            Some(&json!("\"development\""))
        );
        assert!(loaded.overlay(BuildEnvironment::Production).record.is_empty());
        assert_eq!(loaded.into_sources().len(), 3);
    }

    #[test]
    fn test_load_dir_missing_overlay() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.yaml"), "projectName: demo\n").unwrap();
        fs::write(temp_dir.path().join("dev.yaml"), "").unwrap();

        let err = ConfigLoader::load_dir(temp_dir.path()).unwrap_err();
        assert!(err.is_configuration());
        assert!(format!("{err}").contains("production overlay"));
    }

    #[test]
    fn test_load_dir_malformed_unused_overlay_fails() {
        let temp_dir = TempDir::new().unwrap();
        write_dir(temp_dir.path(), "projectName: demo\n", "mini: [", "");

        assert!(ConfigLoader::load_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_discover_from_project_root() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("config");
        fs::create_dir(&config).unwrap();
        fs::write(config.join("index.yaml"), "").unwrap();

        assert_eq!(
            ConfigLoader::discover_config_dir(temp_dir.path()),
            Some(config.clone())
        );
    }

    #[test]
    fn test_discover_from_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("config");
        let nested = temp_dir.path().join("src").join("pages");
        fs::create_dir(&config).unwrap();
        fs::create_dir_all(&nested).unwrap();
        fs::write(config.join("index.json"), "{}").unwrap();

        assert_eq!(ConfigLoader::discover_config_dir(&nested), Some(config));
    }

    #[test]
    fn test_discover_from_config_dir_itself() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("config");
        fs::create_dir(&config).unwrap();
        fs::write(config.join("index.yaml"), "").unwrap();

        assert_eq!(ConfigLoader::discover_config_dir(&config), Some(config.clone()));
    }

    #[test]
    fn test_discover_none() {
        let temp_dir = TempDir::new().unwrap();
        let lonely = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&lonely).unwrap();
        // Walks up past the temp dir; only assert nothing inside it matched.
        if let Some(found) = ConfigLoader::discover_config_dir(&lonely) {
            assert!(!found.starts_with(temp_dir.path()));
        }
    }
}
