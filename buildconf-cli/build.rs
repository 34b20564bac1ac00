//! Build script for buildconf-cli.
//!
//! Generates the man page into OUT_DIR with clap_mangen. Build scripts
//! cannot depend on the crate being built, so the command tree is declared
//! here by hand.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("buildconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve environment-layered build configuration")
        .long_about(
            "Merge a base build configuration with the development or production overlay \
             and print the result",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Use this configuration directory instead of searching for one")
                .value_name("PATH")
                .global(true)
                .env("BUILDCONF_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Print the final configuration for an environment")
                .long_about(
                    "Load index, dev and prod files, apply the overlay selected by --env \
                     or NODE_ENV, and print the merged record",
                ),
            Command::new("validate")
                .about("Validate a single configuration file")
                .long_about("Check one configuration file against the schema"),
            Command::new("init")
                .about("Write starter configuration files")
                .long_about("Write index.yaml, dev.yaml and prod.yaml into a configuration directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("buildconf.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
