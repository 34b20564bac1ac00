#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # buildconf
//!
//! Resolves the build configuration record of a cross-platform application
//! project (mini-program, H5 and native targets).
//!
//! A project keeps a shared base record and two overlays, one for
//! development and one for production. The resolver deep-merges the base
//! with the overlay selected by the build environment and hands the result
//! to the build host.
//!
//! ## Core Types
//!
//! - [`ConfigRecord`] and [`PluginDescriptor`]: the record model
//! - [`ConfigResolver`] and [`BuildEnvironment`]: overlay selection
//! - [`ConfigBuilder`]: loading, validation and resolution in one call
//! - [`ConfigFactory`], [`BuildContext`] and [`define_config`]: the build host contract
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use buildconf::{BuildEnvironment, ConfigRecord, ConfigResolver};
//! use serde_json::json;
//!
//! let base = ConfigRecord::from_value(json!({
//!     "mini": {"cache": {"enable": false}, "postcss": {"url": {"enable": true}}}
//! }))
//! .unwrap();
//! let dev = ConfigRecord::from_value(json!({"mini": {"cache": {"enable": true}}})).unwrap();
//!
//! let resolver = ConfigResolver::new(base, dev, ConfigRecord::new());
//! let record = resolver.resolve(BuildEnvironment::from_indicator("development"));
//!
//! assert_eq!(record.get_path("mini.cache.enable"), Some(&json!(true)));
//! assert_eq!(record.get_path("mini.postcss.url.enable"), Some(&json!(true)));
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod record;
pub mod template;

// Re-export key types at crate root for convenience
pub use config::{
    BuildEnvironment, ConfigBuilder, ConfigLoader, ConfigMerger, ConfigResolver, ConfigValidator,
    ResolvedConfig,
};
pub use error::{Error, Result};
pub use host::{define_config, BuildContext, ConfigFactory, MergeFn};
pub use logging::{init_logger, LogLevel, Logger};
pub use record::{ConfigRecord, InvalidPluginError, PluginDescriptor};
pub use template::{RenderedFile, Template};
