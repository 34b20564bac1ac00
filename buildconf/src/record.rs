//! Configuration records and plugin descriptors.
//!
//! A [`ConfigRecord`] is a nested mapping from string keys to values of
//! mixed type. Records are what the resolver merges and what the build host
//! finally consumes. Key order is preserved as written.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A nested configuration record.
///
/// # Examples
///
/// ```
/// use buildconf::ConfigRecord;
/// use serde_json::json;
///
/// let record = ConfigRecord::from_value(json!({
///     "mini": { "cache": { "enable": true } }
/// }))
/// .unwrap();
///
/// assert_eq!(record.get_path("mini.cache.enable"), Some(&json!(true)));
/// assert_eq!(record.get_path("mini.cache.missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord(Map<String, Value>);

impl ConfigRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Converts a JSON value into a record.
    ///
    /// `null` is accepted as an empty record, which is what an empty YAML
    /// document parses to.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither an object nor null.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidRecord {
                reason: format!("expected a mapping, found {}", kind_name(&other)),
            }),
        }
    }

    /// Consumes the record, returning it as a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrows the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the record, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Looks up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a nested value by dotted path, e.g. `h5.output.filename`.
    ///
    /// Only record segments are traversed; a path that runs into a scalar or
    /// a sequence before its last segment yields `None`.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Inserts a top-level key, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a top-level key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` if the record has the given top-level key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterates over top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Typed view of the `plugins` list.
    ///
    /// Returns an empty list when the key is absent or null.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `plugins` is not a sequence or an entry
    /// is not a valid plugin descriptor.
    pub fn plugins(&self) -> Result<Vec<PluginDescriptor>> {
        descriptors(self.get("plugins"), "plugins")
    }

    /// Typed view of the `presets` list.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ConfigRecord::plugins`].
    pub fn presets(&self) -> Result<Vec<PluginDescriptor>> {
        descriptors(self.get("presets"), "presets")
    }

    /// Renders the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Renders the record as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }
}

impl From<Map<String, Value>> for ConfigRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ConfigRecord {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl FromIterator<(String, Value)> for ConfigRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ConfigRecord {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn descriptors(value: Option<&Value>, field: &str) -> Result<Vec<PluginDescriptor>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    let entries = value
        .as_array()
        .ok_or_else(|| Error::validation(field, "Must be a sequence"))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            PluginDescriptor::try_from(entry).map_err(|e| Error::Validation {
                field: format!("{field}[{i}]"),
                message: e.reason,
            })
        })
        .collect()
}

/// Human-readable name of a JSON value's kind, for error messages.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// An entry identifying an external plugin and its options.
///
/// Accepted shapes are a bare name (`"@scope/plugin"`) or a two-element
/// sequence `[name, options]`. Descriptors are opaque to the resolver; the
/// record keeps the original value untouched.
///
/// # Examples
///
/// ```
/// use buildconf::PluginDescriptor;
/// use serde_json::json;
///
/// let bare = PluginDescriptor::try_from(&json!("@tarojs/plugin-html")).unwrap();
/// assert_eq!(bare.name, "@tarojs/plugin-html");
/// assert!(bare.options.is_none());
///
/// let with_opts =
///     PluginDescriptor::try_from(&json!(["@tarojs/plugin-mock", { "port": 9527 }])).unwrap();
/// assert_eq!(with_opts.options, Some(json!({ "port": 9527 })));
///
/// assert!(PluginDescriptor::try_from(&json!(42)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDescriptor {
    /// Package name or path of the plugin.
    pub name: String,
    /// Options passed to the plugin, if any.
    pub options: Option<Value>,
}

impl PluginDescriptor {
    /// Converts the descriptor back to the value shape it was read from.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match &self.options {
            None => Value::String(self.name.clone()),
            Some(options) => Value::Array(vec![Value::String(self.name.clone()), options.clone()]),
        }
    }
}

impl TryFrom<&Value> for PluginDescriptor {
    type Error = InvalidPluginError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(Self {
                name: non_empty_name(name)?,
                options: None,
            }),
            Value::Array(items) => match items.as_slice() {
                [Value::String(name)] => Ok(Self {
                    name: non_empty_name(name)?,
                    options: None,
                }),
                [Value::String(name), options] => Ok(Self {
                    name: non_empty_name(name)?,
                    options: Some(options.clone()),
                }),
                _ => Err(InvalidPluginError {
                    reason: "Expected [name] or [name, options]".into(),
                }),
            },
            other => Err(InvalidPluginError {
                reason: format!("Expected a plugin name or [name, options], found {}", kind_name(other)),
            }),
        }
    }
}

fn non_empty_name(name: &str) -> std::result::Result<String, InvalidPluginError> {
    if name.trim().is_empty() {
        return Err(InvalidPluginError {
            reason: "Plugin name cannot be empty".into(),
        });
    }
    Ok(name.to_string())
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.options {
            None => write!(f, "{}", self.name),
            Some(_) => write!(f, "{} (with options)", self.name),
        }
    }
}

/// Error type for malformed plugin descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPluginError {
    /// The reason the descriptor is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidPluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plugin descriptor: {}", self.reason)
    }
}

impl std::error::Error for InvalidPluginError {}
