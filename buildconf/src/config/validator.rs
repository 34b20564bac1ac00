//! Configuration validation.
//!
//! Unknown top-level keys are rejected. Known keys are checked for kind and,
//! where the framework gives them meaning, for sensible values. Everything
//! deeper inside target sections is opaque and passes through.

use serde_json::{Map, Value};

use crate::config::schema::{self, COMPILERS, FRAMEWORKS, REQUIRED_KEYS};
use crate::error::{Error, Result};
use crate::record::{kind_name, ConfigRecord, PluginDescriptor};

/// Validates configuration records.
///
/// # Examples
///
/// ```
/// use buildconf::config::ConfigValidator;
/// use buildconf::ConfigRecord;
/// use serde_json::json;
///
/// let overlay = ConfigRecord::from_value(json!({"mini": {}})).unwrap();
/// ConfigValidator::validate_overlay(&overlay).unwrap();
///
/// let unknown = ConfigRecord::from_value(json!({"webpack": {}})).unwrap();
/// assert!(ConfigValidator::validate_overlay(&unknown).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a final, merged record.
    ///
    /// Runs every overlay check and additionally requires the keys a build
    /// host cannot do without. A required key set to null counts as missing.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(record: &ConfigRecord) -> Result<()> {
        Self::validate_overlay(record)?;

        for key in REQUIRED_KEYS {
            if present(record, key).is_none() {
                return Err(Error::validation(*key, "Required key is missing"));
            }
        }

        Ok(())
    }

    /// Validate a partial record (base or overlay).
    ///
    /// A null value is accepted for any known key; in an overlay it unsets
    /// whatever the base held.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate_overlay(record: &ConfigRecord) -> Result<()> {
        for (key, value) in record.iter() {
            let spec = schema::lookup(key)
                .ok_or_else(|| Error::validation(key.as_str(), "Unknown top-level key"))?;

            if !value.is_null() && !spec.kind.matches(value) {
                return Err(Error::validation(
                    key.as_str(),
                    format!("Expected {}, found {}", spec.kind, kind_name(value)),
                ));
            }
        }

        if let Some(name) = record.get("projectName").and_then(Value::as_str) {
            Self::validate_identifier("projectName", name)?;
        }

        if let Some(width) = present(record, "designWidth") {
            Self::validate_positive("designWidth", width)?;
        }

        if let Some(Value::Object(ratios)) = record.get("deviceRatio") {
            Self::validate_device_ratio(ratios)?;
        }

        Self::validate_roots(record)?;

        if let Some(framework) = record.get("framework").and_then(Value::as_str) {
            if !FRAMEWORKS.contains(&framework) {
                return Err(Error::validation(
                    "framework",
                    format!("Unsupported framework '{framework}' (expected one of {})", FRAMEWORKS.join(", ")),
                ));
            }
        }

        if let Some(compiler) = present(record, "compiler") {
            Self::validate_compiler(compiler)?;
        }

        // Plugin lists must hold well-formed descriptors.
        record.plugins()?;
        record.presets()?;

        if let Some(Value::Array(rules)) = record.get("rules") {
            Self::validate_rules(rules)?;
        }

        for section in ["cache", "prebundle"] {
            if let Some(enable) = record.get_path(&format!("{section}.enable")) {
                if !enable.is_boolean() {
                    return Err(Error::validation(
                        format!("{section}.enable"),
                        format!("Expected a boolean, found {}", kind_name(enable)),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Validate string identifiers such as `projectName`.
    ///
    /// Checks that the identifier is non-empty after trimming, contains no
    /// null bytes, and is not longer than 255 characters.
    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::validation(field, "Cannot be empty or only whitespace"));
        }

        if trimmed.contains('\0') {
            return Err(Error::validation(field, "Cannot contain null bytes"));
        }

        if trimmed.chars().count() > 255 {
            return Err(Error::validation(field, "Cannot exceed 255 characters"));
        }

        Ok(())
    }

    fn validate_positive(field: &str, value: &Value) -> Result<()> {
        match value.as_f64() {
            Some(n) if n > 0.0 && n.is_finite() => Ok(()),
            _ => Err(Error::validation(field, "Must be a positive number")),
        }
    }

    /// Keys are design widths, values the scaling ratio for that width.
    fn validate_device_ratio(ratios: &Map<String, Value>) -> Result<()> {
        for (width, ratio) in ratios {
            match width.parse::<u32>() {
                Ok(w) if w > 0 => {}
                _ => {
                    return Err(Error::validation(
                        format!("deviceRatio.{width}"),
                        "Key must be a positive integer design width",
                    ));
                }
            }
            Self::validate_positive(&format!("deviceRatio.{width}"), ratio)?;
        }
        Ok(())
    }

    fn validate_roots(record: &ConfigRecord) -> Result<()> {
        let source = record.get("sourceRoot").and_then(Value::as_str);
        let output = record.get("outputRoot").and_then(Value::as_str);

        for (field, value) in [("sourceRoot", source), ("outputRoot", output)] {
            if let Some(dir) = value {
                if dir.trim().is_empty() {
                    return Err(Error::validation(field, "Cannot be empty"));
                }
            }
        }

        if let (Some(source), Some(output)) = (source, output) {
            if source.trim_end_matches('/') == output.trim_end_matches('/') {
                return Err(Error::validation(
                    "outputRoot",
                    "Must differ from sourceRoot",
                ));
            }
        }

        Ok(())
    }

    fn validate_compiler(compiler: &Value) -> Result<()> {
        let (field, name) = match compiler {
            Value::String(name) => ("compiler", Some(name.as_str())),
            Value::Object(map) => ("compiler.type", map.get("type").and_then(Value::as_str)),
            _ => ("compiler", None),
        };

        match name {
            Some(name) if COMPILERS.contains(&name) => Ok(()),
            Some(name) => Err(Error::validation(
                field,
                format!("Unsupported compiler '{name}' (expected one of {})", COMPILERS.join(", ")),
            )),
            None => Err(Error::validation(field, "Compiler type must be a string")),
        }
    }

    /// Each rule pairs a file matcher with ordered transformation steps.
    fn validate_rules(rules: &[Value]) -> Result<()> {
        for (i, rule) in rules.iter().enumerate() {
            let field = format!("rules[{i}]");
            let rule = rule
                .as_object()
                .ok_or_else(|| Error::validation(field.as_str(), "Rule must be a mapping"))?;

            if !rule.get("test").is_some_and(Value::is_string) {
                return Err(Error::validation(
                    format!("{field}.test"),
                    "Rule matcher must be a string pattern",
                ));
            }

            for matcher in ["include", "exclude"] {
                if let Some(value) = rule.get(matcher) {
                    if !value.is_string() {
                        return Err(Error::validation(
                            format!("{field}.{matcher}"),
                            "Must be a string pattern",
                        ));
                    }
                }
            }

            let steps = rule
                .get("use")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::validation(format!("{field}.use"), "Must be a sequence of steps"))?;

            for (j, step) in steps.iter().enumerate() {
                let loader = match step {
                    Value::String(loader) => Some(loader.as_str()),
                    Value::Object(map) => map.get("loader").and_then(Value::as_str),
                    _ => None,
                };
                if loader.map_or(true, |l| l.trim().is_empty()) {
                    return Err(Error::validation(
                        format!("{field}.use[{j}].loader"),
                        "Step must name a loader",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate a single plugin entry outside of a record.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `field` if the entry is malformed.
    pub fn validate_plugin(field: &str, value: &Value) -> Result<PluginDescriptor> {
        PluginDescriptor::try_from(value).map_err(|e| Error::validation(field, e.reason))
    }
}

/// A top-level value, unless absent or null.
fn present<'a>(record: &'a ConfigRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}
