//! Data types: named validators for parts of a game's data.

use std::collections::HashSet;

use crate::game::Game;

/// Checks one aspect of a game's data.
pub trait DataType: Send + Sync {
    /// Returns a description of the problem when `game` is inconsistent.
    fn validate(&self, game: &Game) -> Result<(), String>;
}

/// A problem reported by a registered data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub data_type: String,
    pub message: String,
}

/// Source bindings must name distinct sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcesDataType;

impl DataType for SourcesDataType {
    fn validate(&self, game: &Game) -> Result<(), String> {
        let mut seen = HashSet::new();
        for binding in game.sources() {
            if !seen.insert(binding.name.as_str()) {
                return Err(format!("source {} bound more than once", binding.name));
            }
        }
        Ok(())
    }
}

/// At most one action may be primary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsDataType;

impl DataType for ActionsDataType {
    fn validate(&self, game: &Game) -> Result<(), String> {
        let primaries = game.actions().iter().filter(|a| a.is_primary()).count();
        if primaries > 1 {
            return Err(format!(
                "{primaries} actions flagged primary, the first one will be used"
            ));
        }
        Ok(())
    }
}
