fn main() {
    println!("Run `cargo test -p games-compat` to execute games.json compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    use launchpad_config::ConfigStore;
    use launchpad_library::{GAMES_DOCUMENT, GameManager, GameRecord, NoRedraw};
    use serde::{Deserialize, Serialize};

    /// Shape of the persisted library document.
    #[derive(Debug, Serialize, Deserialize)]
    struct GamesDocument {
        games: Vec<GameRecord>,
    }

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Copies a fixture into a fresh config directory as `games.json`.
    fn stage_fixture(name: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::copy(fixtures_dir().join(name), dir.path().join(GAMES_DOCUMENT)).unwrap();
        dir
    }

    fn read_saved(dir: &tempfile::TempDir) -> serde_json::Value {
        let data = fs::read_to_string(dir.path().join(GAMES_DOCUMENT)).unwrap();
        serde_json::from_str(&data).unwrap()
    }

    async fn load_manager(dir: &tempfile::TempDir) -> GameManager {
        let store = ConfigStore::json_dir(dir.path());
        let mut mgr = GameManager::new(store, Arc::new(NoRedraw));
        mgr.initialize().await.unwrap();
        mgr
    }

    #[test]
    fn fixture_games_document_roundtrip() {
        let fixture = load_fixture("games.json");
        let parsed: GamesDocument = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize games.json: {e}"));
        let reserialized = serde_json::to_value(&parsed).unwrap();

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch:\n  fixture: {fixture}\n  rust:    {reserialized}"
        );
    }

    #[test]
    fn fixture_keeps_per_source_metadata() {
        let parsed: GamesDocument = serde_json::from_value(load_fixture("games.json")).unwrap();

        let hollow = &parsed.games[0];
        assert_eq!(hollow.extra["steam"]["achievements"]["total"], 63);
        assert_eq!(hollow.actions[0].params["appid"], 367520);

        let celeste = &parsed.games[1];
        assert!(celeste.actions[0].primary.is_none());
        assert!(celeste.extra.contains_key("igdb"));
    }

    #[tokio::test]
    async fn manager_load_save_preserves_fixture() {
        let dir = stage_fixture("games.json");

        let mut mgr = load_manager(&dir).await;
        assert_eq!(mgr.len(), 3);
        mgr.save().await.unwrap();

        assert_eq!(read_saved(&dir), load_fixture("games.json"));
    }

    #[tokio::test]
    async fn manager_resolves_fixture_actions() {
        let dir = stage_fixture("games.json");
        let mgr = load_manager(&dir).await;

        let hollow = mgr.get("Hk3nA9xQ").unwrap();
        assert_eq!(hollow.primary_action().unwrap().kind, "steam");

        let celeste = mgr.get("7fPq2LmZ").unwrap();
        assert!(celeste.primary_action().is_none());

        // Two primaries: the first one is used and the data type flags it.
        let racer = mgr.get("b1").unwrap();
        assert_eq!(racer.primary_action().unwrap().params["path"], "/opt/racer/racer");
        assert_eq!(mgr.validate(racer).len(), 1);
    }

    #[tokio::test]
    async fn minimal_records_gain_empty_lists_on_save() {
        let dir = stage_fixture("minimal.json");

        let mut mgr = load_manager(&dir).await;
        mgr.save().await.unwrap();

        let saved = read_saved(&dir);
        assert_eq!(
            saved,
            serde_json::json!({ "games": [
                { "id": "m1", "name": "Bare Game", "sources": [], "actions": [] },
                { "id": "m2", "name": "Bare Game Two", "origin": "itch", "sources": [], "actions": [] }
            ] })
        );
    }

    #[tokio::test]
    async fn missing_document_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let mgr = load_manager(&dir).await;
        assert!(mgr.is_empty());
        assert_eq!(read_saved(&dir), serde_json::json!({ "games": [] }));
    }
}
