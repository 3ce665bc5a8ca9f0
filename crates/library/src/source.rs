//! Metadata sources a game can be bound to.

use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::game::Game;
use crate::launcher::BoxFuture;

/// A backend that supplies metadata for a game.
///
/// New games get one unpopulated binding per registered source. Populating
/// a binding stores the returned object under the source's name in the
/// game's extra data.
pub trait Source: Send + Sync {
    /// Fetches metadata for `game`.
    fn fetch_metadata<'a>(
        &'a self,
        game: &'a Game,
    ) -> BoxFuture<'a, Result<Map<String, Value>, FetchError>>;
}
