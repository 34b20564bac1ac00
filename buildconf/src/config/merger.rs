//! Deep merging of configuration records.
//!
//! Records merge key by key and recursively. Anything that is not a record
//! (scalars, sequences, null) is replaced outright by the overlay value.

use serde_json::{Map, Value};

use crate::record::ConfigRecord;

/// Merges configuration records according to overlay precedence.
///
/// # Examples
///
/// ```
/// use buildconf::config::ConfigMerger;
/// use buildconf::ConfigRecord;
/// use serde_json::json;
///
/// let base = ConfigRecord::from_value(json!({"mini": {"cache": {"enable": false}}})).unwrap();
/// let dev = ConfigRecord::from_value(json!({"mini": {"cache": {"enable": true}}})).unwrap();
///
/// let merged = ConfigMerger::deep_merge(&base, &dev);
/// assert_eq!(merged.get_path("mini.cache.enable"), Some(&json!(true)));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Deep-merge `overlay` on top of `base`, returning a new record.
    ///
    /// # Merging Rules
    ///
    /// - Nested records: merged key by key
    /// - Scalars, sequences and null: overlay value replaces the base value
    /// - Keys only in the base are kept, keys only in the overlay are added
    #[must_use]
    pub fn deep_merge(base: &ConfigRecord, overlay: &ConfigRecord) -> ConfigRecord {
        let mut result = base.clone().into_map();
        Self::merge_maps(&mut result, overlay.as_map());
        ConfigRecord::from(result)
    }

    /// Merge `overlay` into `target` in place.
    pub fn merge_into(target: &mut ConfigRecord, overlay: &ConfigRecord) {
        let mut map = std::mem::take(target).into_map();
        Self::merge_maps(&mut map, overlay.as_map());
        *target = ConfigRecord::from(map);
    }

    /// Merge an ordered list of records, lowest precedence first.
    ///
    /// Starts from an empty record, so `merge_all(&[&base, &overlay])` has
    /// the same result as `deep_merge(&base, &overlay)`.
    #[must_use]
    pub fn merge_all(layers: &[&ConfigRecord]) -> ConfigRecord {
        let mut result = ConfigRecord::new();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    fn merge_maps(target: &mut Map<String, Value>, overlay: &Map<String, Value>) {
        for (key, overlay_value) in overlay {
            match (target.get_mut(key), overlay_value) {
                (Some(Value::Object(target_map)), Value::Object(overlay_map)) => {
                    Self::merge_maps(target_map, overlay_map);
                }
                _ => {
                    target.insert(key.clone(), overlay_value.clone());
                }
            }
        }
    }
}
