//! Config store and its storage backends.
//!
//! On disk every document is a pretty-printed JSON file inside the Launchpad
//! config directory:
//! - Linux:   `~/.config/launchpad/<name>`
//! - Windows: `%APPDATA%\launchpad\<name>`
//! - Other:   `/tmp/launchpad/<name>`
//!
//! `LAUNCHPAD_CONFIG_DIR` overrides the directory on every platform.

use std::collections::HashMap;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::debug;

use crate::document::ConfigDocument;
use crate::error::ConfigError;

/// Boxed `Send` future returned by storage backends.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "LAUNCHPAD_CONFIG_DIR";

/// Backend that loads and stores whole documents by name.
///
/// Writes are wholesale; atomicity of a single `store` is up to the backend.
pub trait DocumentStorage: Send + Sync {
    /// Loads a document. Returns `None` when it does not exist yet.
    fn load<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Option<Value>, ConfigError>>;

    /// Replaces a document with `value`.
    fn store<'a>(
        &'a self,
        name: &'a str,
        value: &'a Value,
    ) -> BoxFuture<'a, Result<(), ConfigError>>;
}

/// Hands out named [`ConfigDocument`]s backed by a [`DocumentStorage`].
#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn DocumentStorage>,
}

impl ConfigStore {
    /// Creates a store over an arbitrary backend.
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self { storage }
    }

    /// Creates a store that keeps documents as JSON files in `dir`.
    pub fn json_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonDirStorage::new(dir)))
    }

    /// Creates a store that keeps documents in memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Creates a JSON store in [`default_config_dir`].
    pub fn open_default() -> Self {
        Self::json_dir(default_config_dir())
    }

    /// Reads a document by name.
    ///
    /// A document that does not exist yet is returned as an empty object so
    /// callers can apply defaults and write it.
    pub async fn get(&self, name: &str) -> Result<ConfigDocument, ConfigError> {
        validate_name(name)?;

        let value = match self.storage.load(name).await? {
            Some(value) => value,
            None => {
                debug!(document = name, "config document not found, starting empty");
                Value::Object(Map::new())
            }
        };

        Ok(ConfigDocument::new(name, value, Arc::clone(&self.storage)))
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").finish_non_exhaustive()
    }
}

/// Rejects names that would escape the store's directory.
fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON files on disk
// ---------------------------------------------------------------------------

/// Stores each document as `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct JsonDirStorage {
    dir: PathBuf,
}

impl JsonDirStorage {
    /// Creates a storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the storage root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing a document.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn read_document(&self, name: &str) -> Result<Option<Value>, ConfigError> {
        let path = self.document_path(name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "config document loaded");
        Ok(Some(value))
    }

    async fn write_document(&self, name: &str, value: &Value) -> Result<(), ConfigError> {
        let path = self.document_path(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, json).await?;

        debug!(path = %path.display(), "config document written");
        Ok(())
    }
}

impl DocumentStorage for JsonDirStorage {
    fn load<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Option<Value>, ConfigError>> {
        Box::pin(self.read_document(name))
    }

    fn store<'a>(
        &'a self,
        name: &'a str,
        value: &'a Value,
    ) -> BoxFuture<'a, Result<(), ConfigError>> {
        Box::pin(self.write_document(name, value))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps documents in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document, replacing any previous content.
    pub fn insert(&self, name: impl Into<String>, value: Value) {
        self.lock().insert(name.into(), value);
    }

    /// Returns a copy of a stored document.
    pub fn document(&self, name: &str) -> Option<Value> {
        self.lock().get(name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStorage for MemoryStorage {
    fn load<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Option<Value>, ConfigError>> {
        let value = self.document(name);
        Box::pin(async move { Ok::<_, ConfigError>(value) })
    }

    fn store<'a>(
        &'a self,
        name: &'a str,
        value: &'a Value,
    ) -> BoxFuture<'a, Result<(), ConfigError>> {
        self.insert(name, value.clone());
        Box::pin(async move { Ok::<_, ConfigError>(()) })
    }
}

// ---------------------------------------------------------------------------
// Config directory
// ---------------------------------------------------------------------------

/// Returns the directory Launchpad keeps its config documents in.
pub fn default_config_dir() -> PathBuf {
    config_dir_from(std::env::var_os(CONFIG_DIR_ENV))
}

fn config_dir_from(overridden: Option<OsString>) -> PathBuf {
    match overridden.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => config_base_dir().join("launchpad"),
    }
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp")
    }
}
