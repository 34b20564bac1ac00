//! CLI command implementations.
//!
//! - `resolve`: Print the final configuration for an environment
//! - `validate`: Validate a single configuration file
//! - `init`: Write starter configuration files
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod init;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
