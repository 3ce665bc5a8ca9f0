//! In-memory handle on one config document.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::store::DocumentStorage;

/// A named JSON document loaded from a [`ConfigStore`](crate::ConfigStore).
///
/// Paths are dot-separated object keys; numeric segments index arrays
/// (`"games.0.name"`). The empty path addresses the whole document.
/// Mutations only touch memory until [`write`](Self::write) is awaited.
pub struct ConfigDocument {
    name: String,
    value: Value,
    storage: Arc<dyn DocumentStorage>,
}

impl ConfigDocument {
    pub(crate) fn new(name: &str, value: Value, storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            name: name.to_string(),
            value,
            storage,
        }
    }

    /// Returns the document name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fills in top-level keys that are missing. Existing keys are kept as-is.
    ///
    /// A `null` document is replaced by `defaults` entirely. Any other
    /// non-object document is left untouched and rejected with
    /// [`ConfigError::NotAnObject`].
    pub fn defaults(&mut self, defaults: Value) -> Result<&mut Self, ConfigError> {
        if self.value.is_null() {
            self.value = defaults;
            return Ok(self);
        }

        let Value::Object(current) = &mut self.value else {
            return Err(ConfigError::NotAnObject(self.name.clone()));
        };
        if let Value::Object(defaults) = defaults {
            for (key, value) in defaults {
                current.entry(key).or_insert(value);
            }
        }
        Ok(self)
    }

    /// Returns the value at `path`, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        segments(path).try_fold(&self.value, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Deserializes the value at `path`. Returns `Ok(None)` when absent.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.get(path)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(ConfigError::from)
    }

    /// Stores `value` at `path`, creating intermediate objects as needed.
    ///
    /// An array index may address an existing element or append at the end.
    pub fn set(&mut self, path: &str, value: impl Serialize) -> Result<&mut Self, ConfigError> {
        let value = serde_json::to_value(value)?;
        let parts: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = parts.split_last() else {
            return Err(ConfigError::InvalidPath(path.to_string()));
        };

        let mut node = &mut self.value;
        for segment in parents {
            node = child_mut(node, segment, path)?;
        }
        assign(node, last, value, path)?;

        Ok(self)
    }

    /// Returns the whole document.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Persists the whole document.
    pub async fn write(&self) -> Result<(), ConfigError> {
        self.storage.store(&self.name, &self.value).await
    }
}

impl std::fmt::Debug for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDocument")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn child_mut<'v>(
    node: &'v mut Value,
    segment: &str,
    path: &str,
) -> Result<&'v mut Value, ConfigError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => Ok(map
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get_mut(i))
            .ok_or_else(|| ConfigError::InvalidPath(path.to_string())),
        _ => Err(ConfigError::InvalidPath(path.to_string())),
    }
}

fn assign(node: &mut Value, segment: &str, value: Value, path: &str) -> Result<(), ConfigError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = segment
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidPath(path.to_string()))?;
            if index < items.len() {
                items[index] = value;
            } else if index == items.len() {
                items.push(value);
            } else {
                return Err(ConfigError::InvalidPath(path.to_string()));
            }
            Ok(())
        }
        _ => Err(ConfigError::InvalidPath(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use serde_json::json;

    fn doc(value: Value) -> (ConfigDocument, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let doc = ConfigDocument::new("test.json", value, storage.clone());
        (doc, storage)
    }

    #[test]
    fn defaults_only_fill_missing_keys() {
        let (mut d, _) = doc(json!({ "games": [{ "id": "a" }] }));
        d.defaults(json!({ "games": [], "version": 1 })).unwrap();

        assert_eq!(d.value(), &json!({ "games": [{ "id": "a" }], "version": 1 }));
    }

    #[test]
    fn defaults_replace_null_document() {
        let (mut d, _) = doc(Value::Null);
        d.defaults(json!({ "games": [] })).unwrap();
        assert_eq!(d.value(), &json!({ "games": [] }));
    }

    #[test]
    fn defaults_reject_non_object_document() {
        for root in [json!([]), json!("games"), json!(3)] {
            let (mut d, _) = doc(root.clone());
            let err = d.defaults(json!({ "games": [] })).unwrap_err();
            assert!(matches!(err, ConfigError::NotAnObject(ref name) if name == "test.json"));
            assert_eq!(d.value(), &root);
        }
    }

    #[test]
    fn get_walks_objects_and_arrays() {
        let (d, _) = doc(json!({ "games": [{ "name": "Alpha" }, { "name": "Beta" }] }));

        assert_eq!(d.get("games.1.name"), Some(&json!("Beta")));
        assert_eq!(d.get("games.2.name"), None);
        assert_eq!(d.get("games.x"), None);
        assert_eq!(d.get(""), Some(d.value()));
    }

    #[test]
    fn get_as_deserializes() {
        let (d, _) = doc(json!({ "limits": { "max": 5 } }));

        let max: Option<u32> = d.get_as("limits.max").unwrap();
        assert_eq!(max, Some(5));

        let missing: Option<u32> = d.get_as("limits.min").unwrap();
        assert_eq!(missing, None);

        let wrong: Result<Option<Vec<String>>, _> = d.get_as("limits");
        assert!(matches!(wrong, Err(ConfigError::Json(_))));
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let (mut d, _) = doc(json!({}));
        d.set("ui.window.width", 1800).unwrap();
        assert_eq!(d.value(), &json!({ "ui": { "window": { "width": 1800 } } }));
    }

    #[test]
    fn set_replaces_and_appends_array_items() {
        let (mut d, _) = doc(json!({ "games": ["a"] }));
        d.set("games.0", "b").unwrap().set("games.1", "c").unwrap();
        assert_eq!(d.get("games"), Some(&json!(["b", "c"])));

        let err = d.set("games.5", "z").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));
    }

    #[test]
    fn set_through_scalar_is_invalid() {
        let (mut d, _) = doc(json!({ "name": "Alpha" }));
        let err = d.set("name.first", "A").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));

        let err = d.set("", 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn write_persists_whole_document() {
        let (mut d, storage) = doc(json!({}));
        d.defaults(json!({ "games": [] })).unwrap().write().await.unwrap();
        assert_eq!(storage.document("test.json"), Some(json!({ "games": [] })));

        d.set("games", json!([{ "id": "a" }])).unwrap().write().await.unwrap();
        assert_eq!(
            storage.document("test.json"),
            Some(json!({ "games": [{ "id": "a" }] }))
        );
    }
}
