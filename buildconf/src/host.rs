//! The contract between a build host and a configuration factory.
//!
//! A build host calls a factory with a merge function and a
//! [`BuildContext`], and receives the final record back. The merge function
//! is [`ConfigMerger::merge_all`], so a factory written as
//! `merge(&[&base, &overlay])` behaves exactly like [`ConfigResolver`].

use std::fmt;

use crate::config::merger::ConfigMerger;
use crate::config::resolver::ConfigResolver;
use crate::error::Result;
use crate::record::ConfigRecord;

/// Merge function handed to factories. Layers are lowest precedence first.
pub type MergeFn = fn(&[&ConfigRecord]) -> ConfigRecord;

/// What the build host is doing when it asks for a configuration.
///
/// # Examples
///
/// ```
/// use buildconf::BuildContext;
///
/// let ctx = BuildContext::new("build", "production");
/// assert_eq!(ctx.to_string(), "build (mode: production)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildContext {
    /// Host command, such as `build` or `serve`.
    pub command: String,
    /// Host mode string.
    pub mode: String,
}

impl BuildContext {
    /// Creates a context.
    #[must_use]
    pub fn new(command: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            mode: mode.into(),
        }
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mode: {})", self.command, self.mode)
    }
}

/// Produces the final configuration record for a build.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigFactory {
    /// Produce the record.
    ///
    /// # Errors
    ///
    /// Returns whatever error prevented the record from being produced; the
    /// host aborts the build on any error.
    fn create(&self, merge: MergeFn, ctx: &BuildContext) -> Result<ConfigRecord>;
}

impl<F> ConfigFactory for F
where
    F: Fn(MergeFn, &BuildContext) -> Result<ConfigRecord>,
{
    fn create(&self, merge: MergeFn, ctx: &BuildContext) -> Result<ConfigRecord> {
        self(merge, ctx)
    }
}

impl ConfigFactory for ConfigResolver {
    fn create(&self, merge: MergeFn, ctx: &BuildContext) -> Result<ConfigRecord> {
        let env = self.environment();
        log::debug!("Creating {env} configuration for {ctx}");
        Ok(merge(&[self.base(), self.overlay(env)]))
    }
}

/// Invoke a factory the way a build host does.
///
/// # Errors
///
/// Returns the factory's error unchanged.
///
/// # Examples
///
/// ```
/// use buildconf::{define_config, BuildContext, ConfigRecord};
/// use serde_json::json;
///
/// let base = ConfigRecord::from_value(json!({"designWidth": 750})).unwrap();
/// let dev = ConfigRecord::from_value(json!({"designWidth": 375})).unwrap();
///
/// let record = define_config(
///     &|merge: buildconf::MergeFn, _ctx: &BuildContext| -> buildconf::Result<ConfigRecord> {
///         Ok(merge(&[&base, &dev]))
///     },
///     &BuildContext::new("build", "development"),
/// )
/// .unwrap();
/// assert_eq!(record.get("designWidth"), Some(&json!(375)));
/// ```
pub fn define_config<F>(factory: &F, ctx: &BuildContext) -> Result<ConfigRecord>
where
    F: ConfigFactory + ?Sized,
{
    factory.create(ConfigMerger::merge_all, ctx)
}
