//! Declared shape of a build configuration record.
//!
//! Records are mostly opaque payload, so the schema only pins down the
//! top-level keys the framework understands and the kind of value each one
//! holds. Anything nested below a target section (`mini`, `h5`, `rn`) is
//! passed through unchecked.

use std::fmt;

use serde_json::Value;

/// Kind of value a top-level key must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A nested record.
    Record,
    /// A string.
    String,
    /// A number.
    Number,
    /// A boolean.
    Bool,
    /// A sequence.
    Sequence,
    /// Either a string or a nested record.
    StringOrRecord,
    /// Any value; the key is known but its payload is opaque.
    Any,
}

impl FieldKind {
    /// Returns `true` if `value` has this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Record => value.is_object(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Sequence => value.is_array(),
            Self::StringOrRecord => value.is_string() || value.is_object(),
            Self::Any => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Record => "a mapping",
            Self::String => "a string",
            Self::Number => "a number",
            Self::Bool => "a boolean",
            Self::Sequence => "a sequence",
            Self::StringOrRecord => "a string or a mapping",
            Self::Any => "any value",
        };
        f.write_str(name)
    }
}

/// A known top-level key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The key as written in configuration files.
    pub key: &'static str,
    /// The kind of value it holds.
    pub kind: FieldKind,
}

const fn field(key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, kind }
}

/// Every top-level key a record may contain.
pub const TOP_LEVEL_FIELDS: &[FieldSpec] = &[
    field("projectName", FieldKind::String),
    field("date", FieldKind::String),
    field("designWidth", FieldKind::Number),
    field("deviceRatio", FieldKind::Record),
    field("sourceRoot", FieldKind::String),
    field("outputRoot", FieldKind::String),
    field("plugins", FieldKind::Sequence),
    field("presets", FieldKind::Sequence),
    field("defineConstants", FieldKind::Record),
    field("env", FieldKind::Record),
    field("alias", FieldKind::Record),
    field("copy", FieldKind::Record),
    field("rules", FieldKind::Sequence),
    field("framework", FieldKind::String),
    field("compiler", FieldKind::StringOrRecord),
    field("cache", FieldKind::Record),
    field("prebundle", FieldKind::Record),
    field("logger", FieldKind::Record),
    field("sass", FieldKind::Record),
    field("csso", FieldKind::Any),
    field("terser", FieldKind::Any),
    field("mini", FieldKind::Record),
    field("h5", FieldKind::Record),
    field("rn", FieldKind::Record),
];

/// Keys a final, merged record must contain.
pub const REQUIRED_KEYS: &[&str] = &["projectName", "sourceRoot", "outputRoot"];

/// Supported UI frameworks.
pub const FRAMEWORKS: &[&str] = &["react", "preact", "vue", "vue3", "solid"];

/// Supported bundler back ends.
pub const COMPILERS: &[&str] = &["webpack4", "webpack5", "vite"];

/// Target sections carrying per-platform settings.
pub const TARGET_SECTIONS: &[&str] = &["mini", "h5", "rn"];

/// Looks up the declared spec for a top-level key.
///
/// # Examples
///
/// ```
/// use buildconf::config::schema::{lookup, FieldKind};
///
/// assert_eq!(lookup("designWidth").unwrap().kind, FieldKind::Number);
/// assert!(lookup("webpack").is_none());
/// ```
#[must_use]
pub fn lookup(key: &str) -> Option<&'static FieldSpec> {
    TOP_LEVEL_FIELDS.iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_matches() {
        assert!(FieldKind::Record.matches(&json!({})));
        assert!(!FieldKind::Record.matches(&json!([])));
        assert!(FieldKind::Number.matches(&json!(1.5)));
        assert!(FieldKind::StringOrRecord.matches(&json!("webpack5")));
        assert!(FieldKind::StringOrRecord.matches(&json!({"type": "vite"})));
        assert!(!FieldKind::StringOrRecord.matches(&json!(5)));
        assert!(FieldKind::Any.matches(&json!(null)));
    }

    #[test]
    fn test_keys_unique() {
        for (i, spec) in TOP_LEVEL_FIELDS.iter().enumerate() {
            assert!(
                TOP_LEVEL_FIELDS[i + 1..].iter().all(|s| s.key != spec.key),
                "duplicate key {}",
                spec.key
            );
        }
    }

    #[test]
    fn test_required_and_targets_are_declared() {
        for key in REQUIRED_KEYS.iter().chain(TARGET_SECTIONS) {
            assert!(lookup(key).is_some(), "{key} not declared");
        }
    }
}
