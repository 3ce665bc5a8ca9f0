//! Launcher backends: discover games available through a storefront or client.

use std::future::Future;
use std::pin::Pin;

use crate::error::FetchError;
use crate::game::Game;

/// Boxed `Send` future returned by backend traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A pluggable discovery backend.
///
/// The library calls [`fetch_new_games`](Self::fetch_new_games) with every
/// game it already knows so a backend can skip work it has done before.
/// Returned candidates are merged by name; a candidate whose name is
/// already in the library is dropped.
pub trait Launcher: Send + Sync {
    /// Enumerates games this launcher can see.
    fn fetch_new_games<'a>(
        &'a self,
        existing: &'a [&'a Game],
    ) -> BoxFuture<'a, Result<Vec<Game>, FetchError>>;
}
