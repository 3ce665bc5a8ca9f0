//! The game entity.

use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{Action, GameRecord, SourceBinding, is_reserved_key};

/// Mutable metadata of a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameData {
    pub name: String,
    /// Name of the launcher that discovered the game.
    pub origin: Option<String>,
    pub sources: Vec<SourceBinding>,
    pub actions: Vec<Action>,
    /// Per-source metadata and any other persisted keys.
    ///
    /// Entries named after a record field (see
    /// [`RESERVED_KEYS`](crate::types::RESERVED_KEYS)) are dropped when the
    /// game is turned into a record.
    pub extra: Map<String, Value>,
}

/// A game known to the library.
///
/// The id is fixed at construction; everything else lives in [`GameData`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: String,
    data: GameData,
}

impl Game {
    /// Creates a game with no sources or actions.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_data(
            id,
            GameData {
                name: name.into(),
                ..Default::default()
            },
        )
    }

    /// Creates a game from an id and prepared data.
    pub fn with_data(id: impl Into<String>, data: GameData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Builds a game from its persisted record.
    pub fn from_record(record: GameRecord) -> Self {
        let GameRecord {
            id,
            name,
            origin,
            sources,
            actions,
            extra,
        } = record;

        Self {
            id,
            data: GameData {
                name,
                origin,
                sources,
                actions,
                extra,
            },
        }
    }

    /// Returns the plain record persisted for this game.
    pub fn to_record(&self) -> GameRecord {
        self.clone().into_record()
    }

    /// Converts the game into its persisted record.
    pub fn into_record(self) -> GameRecord {
        let GameData {
            name,
            origin,
            sources,
            actions,
            mut extra,
        } = self.data;

        extra.retain(|key, _| {
            let reserved = is_reserved_key(key);
            if reserved {
                warn!(game = %self.id, key = %key, "dropping extra data shadowing a record field");
            }
            !reserved
        });

        GameRecord {
            id: self.id,
            name,
            origin,
            sources,
            actions,
            extra,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn origin(&self) -> Option<&str> {
        self.data.origin.as_deref()
    }

    pub fn sources(&self) -> &[SourceBinding] {
        &self.data.sources
    }

    pub fn actions(&self) -> &[Action] {
        &self.data.actions
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut GameData {
        &mut self.data
    }

    /// Returns the first action flagged primary.
    pub fn primary_action(&self) -> Option<&Action> {
        self.data.actions.iter().find(|a| a.is_primary())
    }

    /// Returns the action at `index`.
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.data.actions.get(index)
    }

    /// Picks the action a launch would run: the one at `index` when given,
    /// otherwise the primary action.
    pub fn resolve_action(&self, index: Option<usize>) -> Option<&Action> {
        match index {
            Some(i) => self.action(i),
            None => self.primary_action(),
        }
    }
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        Self::from_record(record)
    }
}

impl From<Game> for GameRecord {
    fn from(game: Game) -> Self {
        game.into_record()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.data.name, self.id)
    }
}
