//! Integration tests for error handling and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Semantic failure (validation errors)
//! - Exit code 4: Invalid arguments
//! - Exit code 7: Configuration error

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::with_config();

    env.command().arg("resolve").assert().code(0);
    env.command()
        .arg("validate")
        .arg(env.config_dir.join("prod.yaml"))
        .assert()
        .code(0);
}

// ============================================================================
// Semantic Failures (Exit Code 1)
// ============================================================================

/// An unknown top-level key in an overlay fails validation.
#[test]
fn test_unknown_key_exit_code() {
    let env = TestEnv::with_config();
    env.write_config("prod.yaml", "webpackChain: {}\n");

    env.command()
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("webpackChain"));
}

/// Validation covers the overlay that is not selected too.
#[test]
fn test_invalid_unselected_overlay_exit_code() {
    let env = TestEnv::with_config();
    env.write_config("dev.yaml", "plugins: [42]\n");

    env.command()
        .args(["resolve", "--env", "production"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("plugins[0]"));
}

// ============================================================================
// Invalid Arguments (Exit Code 4)
// ============================================================================

#[test]
fn test_validate_missing_file_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["validate", "no-such-file.yaml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("File not found"));
}

// ============================================================================
// Configuration Errors (Exit Code 7)
// ============================================================================

/// A malformed overlay aborts the build even when it is not selected.
#[test]
fn test_malformed_overlay_exit_code() {
    let env = TestEnv::with_config();
    env.write_config("prod.yaml", "h5: [unclosed\n");

    env.command()
        .args(["resolve", "--env", "development"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("prod.yaml"));
}

#[test]
fn test_missing_overlay_exit_code() {
    let env = TestEnv::new();
    env.write_config("index.yaml", common::BASE_YAML);
    env.write_config("prod.yaml", common::PROD_YAML);

    env.command()
        .arg("resolve")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("development overlay"));
}

#[test]
fn test_no_config_dir_exit_code() {
    let env = TestEnv::new();

    env.command()
        .arg("resolve")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("No configuration directory found"));
}

#[test]
fn test_validate_malformed_file_exit_code() {
    let env = TestEnv::new();
    let path = env.write_config("dev.json", "{\"mini\": ");

    env.command().arg("validate").arg(&path).assert().code(7);
}

#[test]
fn test_non_mapping_file_exit_code() {
    let env = TestEnv::new();
    let path = env.write_config("dev.yaml", "- just\n- a list\n");

    env.command().arg("validate").arg(&path).assert().failure();
}
