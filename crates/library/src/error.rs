//! Error types for game library operations.

use launchpad_config::ConfigError;

/// Failure reported by a launcher or source backend.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the game library.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("{kind} not registered: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("config I/O error: {0}")]
    Config(#[from] ConfigError),

    #[error("launcher {launcher} failed to fetch games: {source}")]
    LauncherFetch {
        launcher: String,
        #[source]
        source: FetchError,
    },

    #[error("source {source_name} failed to fetch metadata: {error}")]
    SourceFetch {
        source_name: String,
        #[source]
        error: FetchError,
    },

    #[error("source name {0} collides with a game record field")]
    ReservedSourceName(String),

    #[error("duplicate game id: {0}")]
    DuplicateId(String),

    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("game library already initialized")]
    AlreadyInitialized,

    #[error("game library not initialized")]
    NotInitialized,
}
