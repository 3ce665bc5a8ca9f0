//! Async JSON document store for Launchpad configuration files.
//!
//! A [`ConfigStore`] hands out named [`ConfigDocument`]s. Each document is a
//! single JSON value held in memory; callers apply defaults, read and modify
//! it through dot-separated paths, and persist it wholesale with
//! [`ConfigDocument::write`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), launchpad_config::ConfigError> {
//! use launchpad_config::ConfigStore;
//!
//! let store = ConfigStore::open_default();
//! let mut doc = store.get("games.json").await?;
//! doc.defaults(serde_json::json!({ "games": [] }))?.write().await?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod store;

// Re-export primary types for convenience.
pub use document::ConfigDocument;
pub use error::ConfigError;
pub use store::{
    BoxFuture, CONFIG_DIR_ENV, ConfigStore, DocumentStorage, JsonDirStorage, MemoryStorage,
    default_config_dir,
};
