//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated project directory with a `config/` directory and a
//! command builder that does not inherit `NODE_ENV` or
//! `BUILDCONF_CONFIG_DIR` from the test runner.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Base record shared by most tests.
pub const BASE_YAML: &str = "\
projectName: cli-app
sourceRoot: src
outputRoot: dist
designWidth: 750
plugins: []
mini:
  cache:
    enable: false
  postcss:
    url:
      enable: true
h5:
  publicPath: /
";

/// Development overlay shared by most tests.
pub const DEV_YAML: &str = "\
env:
  NODE_ENV: '\"development\"'
mini:
  cache:
    enable: true
";

/// Production overlay shared by most tests.
pub const PROD_YAML: &str = "\
env:
  NODE_ENV: '\"production\"'
h5:
  publicPath: /cdn/
";

/// Test environment with an isolated project directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the project root
    pub project_dir: PathBuf,
    /// Path to the project's configuration directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty project; `config/` is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join("cli-app");
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        let config_dir = project_dir.join("config");

        Self {
            temp_dir,
            project_dir,
            config_dir,
        }
    }

    /// Create a project with the shared base and overlays.
    pub fn with_config() -> Self {
        let env = Self::new();
        env.write_config("index.yaml", BASE_YAML);
        env.write_config("dev.yaml", DEV_YAML);
        env.write_config("prod.yaml", PROD_YAML);
        env
    }

    /// Write a file into the configuration directory.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
        let path = self.config_dir.join(name);
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    /// Command with a clean environment, run from the project directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("buildconf").expect("Failed to find buildconf binary");
        cmd.current_dir(&self.project_dir)
            .env_remove("NODE_ENV")
            .env_remove("BUILDCONF_CONFIG_DIR")
            .env_remove("BUILDCONF_LOG_MODE");
        cmd
    }

    /// Run `resolve` with the given extra args and parse the JSON output.
    pub fn resolve_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .arg("resolve")
            .args(args)
            .output()
            .expect("Failed to run resolve");

        assert!(
            output.status.success(),
            "resolve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("resolve output is not JSON")
    }

    /// Get the project path.
    pub fn path(&self) -> &Path {
        &self.project_dir
    }
}
