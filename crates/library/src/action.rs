//! Action-type handlers: the platform-specific side of launching a game.

use crate::game::Game;
use crate::types::Action;

/// Runs one kind of launch action.
///
/// Handlers are invoked synchronously from
/// [`GameManager::launch`](crate::GameManager::launch) and own whatever
/// they start.
pub trait ActionHandler: Send + Sync {
    fn launch(&self, game: &Game, action: &Action);
}

impl<F> ActionHandler for F
where
    F: Fn(&Game, &Action) + Send + Sync,
{
    fn launch(&self, game: &Game, action: &Action) {
        self(game, action)
    }
}
