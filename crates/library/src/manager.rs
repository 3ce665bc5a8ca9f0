//! Game manager: the game collection, its registries, and persistence.
//!
//! Discovery asks every registered launcher for candidates and merges them
//! into the collection by exact name, so the same game reported by two
//! storefronts is kept once (first launcher wins). Launching resolves an
//! action on the game and hands it to the handler registered for its type.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use launchpad_config::{ConfigDocument, ConfigStore};
use serde_json::{Value, json};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::action::ActionHandler;
use crate::data::{ActionsDataType, DataType, SourcesDataType, ValidationIssue};
use crate::error::LibraryError;
use crate::game::{Game, GameData};
use crate::launcher::Launcher;
use crate::panel::{DEFAULT_PANELS, Panel};
use crate::redraw::RedrawSignal;
use crate::registry::Registry;
use crate::source::Source;
use crate::types::{GameRecord, SourceBinding, is_reserved_key};

/// Name of the config document holding the library.
pub const GAMES_DOCUMENT: &str = "games.json";

/// Owns every known game plus the registries that extend the library.
///
/// Mutations go through named methods so each one can notify the
/// [`RedrawSignal`]. All mutating operations take `&mut self`; discovery
/// runs launchers one after another against the same collection.
pub struct GameManager {
    store: ConfigStore,
    redraw: Arc<dyn RedrawSignal>,
    document: Option<ConfigDocument>,
    games: IndexMap<String, Game>,
    sources: Registry<dyn Source>,
    launchers: Registry<dyn Launcher>,
    panels: Registry<dyn Panel>,
    action_types: Registry<dyn ActionHandler>,
    data_types: Registry<dyn DataType>,
}

impl GameManager {
    /// Creates an empty manager with the built-in panels and data types.
    ///
    /// Nothing is read until [`initialize`](Self::initialize).
    pub fn new(store: ConfigStore, redraw: Arc<dyn RedrawSignal>) -> Self {
        let mut data_types: Registry<dyn DataType> = Registry::new("data type");
        data_types.register("sources", Arc::new(SourcesDataType));
        data_types.register("actions", Arc::new(ActionsDataType));

        let mut panels: Registry<dyn Panel> = Registry::new("panel");
        for (name, panel) in DEFAULT_PANELS {
            panels.register(name, Arc::new(panel));
        }

        Self {
            store,
            redraw,
            document: None,
            games: IndexMap::new(),
            sources: Registry::new("source"),
            launchers: Registry::new("launcher"),
            panels,
            action_types: Registry::new("action type"),
            data_types,
        }
    }

    // -----------------------------------------------------------------------
    // Registries
    // -----------------------------------------------------------------------

    pub fn sources(&self) -> &Registry<dyn Source> {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut Registry<dyn Source> {
        &mut self.sources
    }

    pub fn launchers(&self) -> &Registry<dyn Launcher> {
        &self.launchers
    }

    pub fn launchers_mut(&mut self) -> &mut Registry<dyn Launcher> {
        &mut self.launchers
    }

    pub fn panels(&self) -> &Registry<dyn Panel> {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut Registry<dyn Panel> {
        &mut self.panels
    }

    pub fn action_types(&self) -> &Registry<dyn ActionHandler> {
        &self.action_types
    }

    pub fn action_types_mut(&mut self) -> &mut Registry<dyn ActionHandler> {
        &mut self.action_types
    }

    pub fn data_types(&self) -> &Registry<dyn DataType> {
        &self.data_types
    }

    pub fn data_types_mut(&mut self) -> &mut Registry<dyn DataType> {
        &mut self.data_types
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Whether [`initialize`](Self::initialize) has completed.
    pub fn is_initialized(&self) -> bool {
        self.document.is_some()
    }

    /// Loads the library from [`GAMES_DOCUMENT`].
    ///
    /// A missing document is created as `{"games": []}`; a document whose
    /// root is not an object is rejected. Records failing
    /// data-type validation are loaded anyway and logged. May only be
    /// called once.
    pub async fn initialize(&mut self) -> Result<(), LibraryError> {
        if self.document.is_some() {
            return Err(LibraryError::AlreadyInitialized);
        }
        let started = Instant::now();

        let mut document = self.store.get(GAMES_DOCUMENT).await?;
        document.defaults(json!({ "games": [] }))?.write().await?;

        let records: Vec<GameRecord> = document.get_as("games")?.unwrap_or_default();
        let mut loaded: IndexMap<String, Game> = IndexMap::with_capacity(records.len());
        for record in records {
            let game = Game::from_record(record);
            if loaded.contains_key(game.id()) || self.games.contains_key(game.id()) {
                return Err(LibraryError::DuplicateId(game.id().to_string()));
            }
            for issue in self.validate(&game) {
                warn!(
                    game = %game,
                    data_type = %issue.data_type,
                    "invalid game data: {}",
                    issue.message
                );
            }
            loaded.insert(game.id().to_string(), game);
        }

        self.games.extend(loaded);
        self.document = Some(document);
        self.redraw.redraw();

        debug!(
            count = self.games.len(),
            elapsed = ?started.elapsed(),
            "loaded games"
        );
        Ok(())
    }

    /// Writes every game, in collection order, to [`GAMES_DOCUMENT`].
    pub async fn save(&mut self) -> Result<(), LibraryError> {
        let started = Instant::now();
        let document = self
            .document
            .as_mut()
            .ok_or(LibraryError::NotInitialized)?;

        let records: Vec<GameRecord> = self.games.values().map(Game::to_record).collect();
        document.set("games", &records)?.write().await?;

        debug!(
            count = records.len(),
            elapsed = ?started.elapsed(),
            "saved games"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    /// Asks one launcher for games and merges the new ones.
    ///
    /// A candidate is dropped when a game with exactly the same name is
    /// already known, or when its id is taken. Accepted candidates get
    /// `origin` set to `launcher_name`. Returns how many games were added.
    pub async fn find(&mut self, launcher_name: &str) -> Result<usize, LibraryError> {
        let started = Instant::now();
        let launcher = self.launchers.require(launcher_name)?;

        let candidates = {
            let existing: Vec<&Game> = self.games.values().collect();
            launcher
                .fetch_new_games(&existing)
                .await
                .map_err(|source| LibraryError::LauncherFetch {
                    launcher: launcher_name.to_string(),
                    source,
                })?
        };

        let fetched = candidates.len();
        let mut added = 0;
        for mut game in candidates {
            if self.games.values().any(|known| known.name() == game.name()) {
                continue;
            }
            if self.games.contains_key(game.id()) {
                warn!(
                    launcher = launcher_name,
                    game = %game,
                    "discovered game reuses a known id, skipping"
                );
                continue;
            }

            game.data_mut().origin = Some(launcher_name.to_string());
            self.put(game);
            added += 1;
        }

        debug!(
            launcher = launcher_name,
            added,
            fetched,
            elapsed = ?started.elapsed(),
            "found new games"
        );
        Ok(added)
    }

    /// Runs [`find`](Self::find) for every registered launcher in
    /// registration order. Stops at the first failure.
    pub async fn find_all(&mut self) -> Result<usize, LibraryError> {
        let started = Instant::now();
        let size_before = self.games.len();

        let launchers: Vec<String> = self.launchers.keys().map(str::to_string).collect();
        for name in &launchers {
            self.find(name).await?;
        }

        let added = self.games.len() - size_before;
        debug!(
            launchers = launchers.len(),
            added,
            elapsed = ?started.elapsed(),
            "found new games across launchers"
        );
        Ok(added)
    }

    /// Fills every unpopulated source binding of a game whose source is
    /// registered. Returns how many bindings were populated.
    ///
    /// Metadata is stored in the game's extra data under the source name.
    /// A pending source named like a record field fails the whole call
    /// before anything is fetched. On fetch failure the bindings populated
    /// so far are kept.
    pub async fn populate(&mut self, id: &str) -> Result<usize, LibraryError> {
        let snapshot = self
            .games
            .get(id)
            .cloned()
            .ok_or_else(|| LibraryError::GameNotFound(id.to_string()))?;

        let pending: Vec<(usize, String, Arc<dyn Source>)> = snapshot
            .sources()
            .iter()
            .enumerate()
            .filter(|(_, binding)| !binding.populated)
            .filter_map(|(index, binding)| {
                self.sources
                    .get(&binding.name)
                    .map(|source| (index, binding.name.clone(), Arc::clone(source)))
            })
            .collect();

        // Metadata is keyed by source name inside the record, so a source
        // named like a record field would overwrite it on save.
        if let Some((_, name, _)) = pending.iter().find(|(_, name, _)| is_reserved_key(name)) {
            return Err(LibraryError::ReservedSourceName(name.clone()));
        }

        let mut populated = 0;
        let mut failure = None;
        for (index, name, source) in pending {
            let metadata = match source.fetch_metadata(&snapshot).await {
                Ok(metadata) => metadata,
                Err(error) => {
                    failure = Some(LibraryError::SourceFetch {
                        source_name: name,
                        error,
                    });
                    break;
                }
            };

            if let Some(game) = self.games.get_mut(id) {
                let data = game.data_mut();
                data.extra.insert(name, Value::Object(metadata));
                if let Some(binding) = data.sources.get_mut(index) {
                    binding.populated = true;
                }
                populated += 1;
            }
        }

        if populated > 0 {
            self.redraw.redraw();
        }
        debug!(game = %snapshot, populated, "populated sources");

        match failure {
            Some(error) => Err(error),
            None => Ok(populated),
        }
    }

    // -----------------------------------------------------------------------
    // Launching
    // -----------------------------------------------------------------------

    /// Launches a game.
    ///
    /// With `index` the action at that position runs; without it the first
    /// primary action does. When no action resolves nothing runs and
    /// `Ok(false)` is returned. An action whose type has no registered
    /// handler is a [`LibraryError::NotFound`].
    pub fn launch(&self, game: &Game, index: Option<usize>) -> Result<bool, LibraryError> {
        let started = Instant::now();
        debug!(game = %game, ?index, "launching");

        let Some(action) = game.resolve_action(index) else {
            debug!(game = %game, ?index, "no action to launch");
            return Ok(false);
        };

        let handler = self.action_types.require(&action.kind)?;
        handler.launch(game, action);

        debug!(
            game = %game,
            action_type = %action.kind,
            elapsed = ?started.elapsed(),
            "launched"
        );
        Ok(true)
    }

    /// Launches a game from the collection by id.
    pub fn launch_by_id(&self, id: &str, index: Option<usize>) -> Result<bool, LibraryError> {
        let game = self
            .games
            .get(id)
            .ok_or_else(|| LibraryError::GameNotFound(id.to_string()))?;
        self.launch(game, index)
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    /// Builds a new game with a fresh id and one pending binding per
    /// registered source. The game is not added to the collection.
    pub fn create(&self, name: impl Into<String>) -> Game {
        let sources = self.sources.keys().map(SourceBinding::pending).collect();
        Game::with_data(
            self.generate_id(),
            GameData {
                name: name.into(),
                sources,
                ..Default::default()
            },
        )
    }

    /// Adds or replaces a game, keyed by its id. Returns the replaced game.
    pub fn set(&mut self, game: Game) -> Option<Game> {
        self.put(game)
    }

    /// Adds a game whose id is not in the collection yet.
    pub fn insert(&mut self, game: Game) -> Result<(), LibraryError> {
        if self.games.contains_key(game.id()) {
            return Err(LibraryError::DuplicateId(game.id().to_string()));
        }
        self.put(game);
        Ok(())
    }

    /// Removes a game, keeping the order of the rest.
    pub fn delete(&mut self, id: &str) -> Option<Game> {
        let removed = self.games.shift_remove(id);
        if removed.is_some() {
            self.redraw.redraw();
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    /// Games in collection order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    // -----------------------------------------------------------------------
    // Data types and panels
    // -----------------------------------------------------------------------

    /// Runs every registered data type against `game`.
    pub fn validate(&self, game: &Game) -> Vec<ValidationIssue> {
        self.data_types
            .iter()
            .filter_map(|(name, data_type)| {
                data_type.validate(game).err().map(|message| ValidationIssue {
                    data_type: name.to_string(),
                    message,
                })
            })
            .collect()
    }

    /// Names of the panels that apply to `game`, in registration order.
    pub fn panels_for(&self, game: &Game) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|(_, panel)| panel.applies_to(game))
            .map(|(name, _)| name)
            .collect()
    }

    fn put(&mut self, game: Game) -> Option<Game> {
        let previous = self.games.insert(game.id().to_string(), game);
        self.redraw.redraw();
        previous
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.games.contains_key(&id) {
                return id;
            }
        }
    }
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("games", &self.games.len())
            .field("initialized", &self.is_initialized())
            .field("sources", &self.sources)
            .field("launchers", &self.launchers)
            .field("panels", &self.panels)
            .field("action_types", &self.action_types)
            .field("data_types", &self.data_types)
            .finish_non_exhaustive()
    }
}
