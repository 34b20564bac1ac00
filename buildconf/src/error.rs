//! Error types for the buildconf library.
//!
//! This module provides the error hierarchy for loading, validating and
//! resolving configuration records, using `thiserror` for ergonomic error
//! handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a buildconf error.
///
/// # Examples
///
/// ```
/// use buildconf::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(750)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the buildconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be loaded or parsed.
    ///
    /// This is the error a build host sees when the base record or either
    /// overlay is missing or malformed. It aborts the build.
    #[error("configuration error in {}: {message}", path.display())]
    Configuration {
        /// The file that failed to load.
        path: PathBuf,
        /// A description of the failure.
        message: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// Dotted path of the field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A value could not be used as a configuration record.
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// Why the value was rejected.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Check if the error came from loading or parsing a configuration file.
    ///
    /// # Examples
    ///
    /// ```
    /// use buildconf::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Configuration {
    ///     path: PathBuf::from("config/dev.yaml"),
    ///     message: "missing".to_string(),
    /// };
    /// assert!(err.is_configuration());
    /// ```
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if the error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = Error::Configuration {
            path: PathBuf::from("config/prod.yaml"),
            message: "Invalid YAML".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("configuration error"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("config/prod.yaml"));
        assert!(display.contains("Invalid YAML"));
        assert!(err.is_configuration());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error() {
        let err = Error::validation("designWidth", "must be a positive number");
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("designWidth"));
        assert!(display.contains("must be a positive number"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_record_error() {
        let err = Error::InvalidRecord {
            reason: "expected a mapping, found a sequence".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid record"));
        assert!(display.contains("sequence"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{err}").contains("JSON error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Err(Error::InvalidRecord {
                reason: "test".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
