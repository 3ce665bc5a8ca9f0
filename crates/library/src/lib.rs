//! Game library core: known games, launcher discovery, launch dispatch and
//! persistence.
//!
//! This crate implements the **business logic** of the launcher. It has no
//! UI or platform dependencies; the shell registers implementations of the
//! capability traits and drives a single [`GameManager`].
//!
//! # Extension points
//!
//! - **Launchers** ([`Launcher`]) discover games from a storefront or client
//! - **Sources** ([`Source`]) supply per-game metadata
//! - **Action types** ([`ActionHandler`]) start a game
//! - **Panels** ([`Panel`]) and **data types** ([`DataType`]) describe and
//!   check game details
//!
//! # Persistence
//!
//! The collection is stored as `games.json` in a
//! [`ConfigStore`](launchpad_config::ConfigStore): read once by
//! [`GameManager::initialize`], written wholesale by [`GameManager::save`].

pub mod action;
pub mod data;
pub mod error;
pub mod game;
pub mod launcher;
pub mod manager;
pub mod panel;
pub mod redraw;
pub mod registry;
pub mod source;
pub mod types;

// Re-export primary types for convenience.
pub use action::ActionHandler;
pub use data::{ActionsDataType, DataType, SourcesDataType, ValidationIssue};
pub use error::{FetchError, LibraryError};
pub use game::{Game, GameData};
pub use launcher::{BoxFuture, Launcher};
pub use manager::{GAMES_DOCUMENT, GameManager};
pub use panel::{BuiltinPanel, DEFAULT_PANELS, Panel};
pub use redraw::{NoRedraw, RedrawChannel, RedrawFn, RedrawSignal};
pub use registry::Registry;
pub use source::Source;
pub use types::{Action, GameRecord, RESERVED_KEYS, SourceBinding, is_reserved_key};
