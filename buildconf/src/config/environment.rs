//! Build environment selection.
//!
//! The environment decides which overlay is layered on the base record.
//! `NODE_ENV=development` selects the development overlay; every other
//! value, including an unset variable, selects production.

use std::env;
use std::fmt;

/// Environment variable holding the environment indicator.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// The indicator value that selects the development overlay.
pub const DEVELOPMENT: &str = "development";

/// Which overlay to apply on top of the base record.
///
/// # Examples
///
/// ```
/// use buildconf::BuildEnvironment;
///
/// assert_eq!(
///     BuildEnvironment::from_indicator("development"),
///     BuildEnvironment::Development
/// );
/// assert_eq!(
///     BuildEnvironment::from_indicator("staging"),
///     BuildEnvironment::Production
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildEnvironment {
    /// Local development build (no minification).
    Development,
    /// Production build. Selected for any indicator other than `development`.
    #[default]
    Production,
}

impl BuildEnvironment {
    /// Maps an indicator string to an environment.
    ///
    /// The comparison is exact: only `development` selects
    /// [`BuildEnvironment::Development`].
    #[must_use]
    pub fn from_indicator(indicator: &str) -> Self {
        if indicator == DEVELOPMENT {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Reads `NODE_ENV` from the process environment.
    ///
    /// This is the only place the library reads the process environment.
    /// Everything downstream takes a `BuildEnvironment` argument.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(NODE_ENV_VAR) {
            Ok(value) => Self::from_indicator(&value),
            Err(_) => Self::Production,
        }
    }

    /// Returns the canonical indicator string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT,
            Self::Production => "production",
        }
    }

    /// File stem of the overlay for this environment (`dev` or `prod`).
    #[must_use]
    pub const fn overlay_stem(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prod",
        }
    }

    /// Returns `true` for [`BuildEnvironment::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BuildEnvironment {
    fn from(indicator: &str) -> Self {
        Self::from_indicator(indicator)
    }
}
