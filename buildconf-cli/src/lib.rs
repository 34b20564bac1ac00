//! Library exports for buildconf-cli.
//!
//! Exposes the CLI structure so documentation tooling can walk it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
