//! Plain records persisted in `games.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys of a [`GameRecord`] that are fields of their own and can never be
/// carried in its `extra` map.
pub const RESERVED_KEYS: [&str; 5] = ["id", "name", "origin", "sources", "actions"];

/// Whether `key` names a fixed [`GameRecord`] field.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// One game as stored on disk.
///
/// Keys the library does not know about (per-source metadata and the like)
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceBinding>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Binds a game to a metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBinding {
    pub name: String,
    pub populated: bool,
}

impl SourceBinding {
    /// A binding whose source has not supplied data yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            populated: false,
        }
    }
}

/// A launch action.
///
/// `kind` selects the registered action-type handler; any other keys are
/// handler parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Action {
    /// Creates a non-primary action with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            primary: None,
            params: Map::new(),
        }
    }

    /// Marks the action as primary.
    pub fn as_primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }

    /// Adds a handler parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Whether this action is flagged primary.
    pub fn is_primary(&self) -> bool {
        self.primary == Some(true)
    }
}
