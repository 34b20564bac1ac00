//! Configuration system for buildconf.
//!
//! This module turns a configuration directory into the single record a
//! build host consumes:
//! - YAML or JSON files for the base record and the two overlays
//! - Environment selection (`NODE_ENV`), isolated behind [`BuildEnvironment`]
//! - Deep merging of the selected overlay onto the base
//! - Schema validation of every source and of the final record
//!
//! # Layout
//!
//! ```text
//! config/
//!   index.yaml   base record, always applied
//!   dev.yaml     overlay for NODE_ENV=development
//!   prod.yaml    overlay for every other NODE_ENV
//! ```
//!
//! # Examples
//!
//! Resolving from a directory:
//!
//! ```no_run
//! use buildconf::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let resolved = ConfigBuilder::new()
//!     .with_config_dir(Path::new("config"))
//!     .build()
//!     .unwrap();
//!
//! println!("{}", resolved.record.to_json_pretty().unwrap());
//! ```
//!
//! Resolving in memory:
//!
//! ```
//! use buildconf::config::{BuildEnvironment, ConfigResolver};
//! use buildconf::ConfigRecord;
//! use serde_json::json;
//!
//! let base = ConfigRecord::from_value(json!({"outputRoot": "dist"})).unwrap();
//! let prod = ConfigRecord::from_value(json!({"outputRoot": "dist/prod"})).unwrap();
//! let resolver = ConfigResolver::new(base, ConfigRecord::new(), prod);
//!
//! let record = resolver.resolve(BuildEnvironment::Production);
//! assert_eq!(record.get("outputRoot"), Some(&json!("dist/prod")));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod resolver;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::{ConfigBuilder, ResolvedConfig};
pub use environment::{BuildEnvironment, NODE_ENV_VAR};
pub use loader::{ConfigLoader, ConfigSource, LoadedConfig, SourceKind};
pub use merger::ConfigMerger;
pub use resolver::ConfigResolver;
pub use schema::{FieldKind, FieldSpec};
pub use validator::ConfigValidator;
