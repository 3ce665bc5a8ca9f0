//! Named registry of capability implementations.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::LibraryError;

/// Ordered mapping from name to a shared implementation.
///
/// Used for sources, launchers, panels, action types and data types.
/// Registering an existing name replaces the entry in place (last write
/// wins, registration order unchanged). Entries cannot be removed.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: IndexMap<String, Arc<T>>,
}

impl<T: ?Sized> Registry<T> {
    /// Creates an empty registry. `kind` labels it in errors and logs.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Registers `entry` under `name`, returning the entry it replaced.
    pub fn register(&mut self, name: impl Into<String>, entry: Arc<T>) -> Option<Arc<T>> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), entry);
        if previous.is_some() {
            debug!(kind = self.kind, name = %name, "registry entry replaced");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.entries.get(name)
    }

    /// Like [`get`](Self::get) but turns a miss into [`LibraryError::NotFound`].
    pub fn require(&self, name: &str) -> Result<Arc<T>, LibraryError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| LibraryError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Greeter for Fixed {
        fn greet(&self) -> String {
            self.0.to_string()
        }
    }

    fn registry() -> Registry<dyn Greeter> {
        let mut r: Registry<dyn Greeter> = Registry::new("greeter");
        r.register("steam", Arc::new(Fixed("hi from steam")));
        r.register("gog", Arc::new(Fixed("hi from gog")));
        r
    }

    #[test]
    fn register_and_get() {
        let r = registry();
        assert_eq!(r.len(), 2);
        assert!(r.contains("gog"));
        assert_eq!(r.get("steam").unwrap().greet(), "hi from steam");
        assert!(r.get("epic").is_none());
    }

    #[test]
    fn keys_follow_registration_order_and_restart() {
        let r = registry();
        let first: Vec<&str> = r.keys().collect();
        let second: Vec<&str> = r.keys().collect();
        assert_eq!(first, vec!["steam", "gog"]);
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_name_last_write_wins_in_place() {
        let mut r = registry();
        let previous = r.register("steam", Arc::new(Fixed("replaced")));

        assert_eq!(previous.unwrap().greet(), "hi from steam");
        assert_eq!(r.get("steam").unwrap().greet(), "replaced");
        assert_eq!(r.len(), 2);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["steam", "gog"]);
    }

    #[test]
    fn require_reports_kind_and_name() {
        let r = registry();
        assert!(r.require("gog").is_ok());

        match r.require("epic") {
            Err(LibraryError::NotFound { kind, name }) => {
                assert_eq!(kind, "greeter");
                assert_eq!(name, "epic");
            }
            other => panic!("expected NotFound, got {:?}", other.map(|g| g.greet())),
        }
    }

    #[test]
    fn empty_registry() {
        let r: Registry<dyn Greeter> = Registry::new("greeter");
        assert!(r.is_empty());
        assert_eq!(r.keys().count(), 0);
    }
}
