//! Read-only view of the persistence tier needed to coordinate with peers.

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::models::{ActiveTimerRecord, CoinConsumeRecord, GameServer};

/// Result alias for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Error raised by directory backends regardless of the underlying store.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("game directory unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl DirectoryError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        DirectoryError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Abstraction over the persistence tier owned by the surrounding API
/// process. The coordination layer never writes through this trait.
pub trait GameDirectory: Send + Sync {
    /// Game-server assignment for a game. `None` means the game has no live
    /// peer (not yet hosted, or already torn down) and callers skip silently.
    fn game_server(&self, game_id: u64) -> BoxFuture<'static, DirectoryResult<Option<GameServer>>>;

    /// Active games whose tracker rows still carry a buy-in or break expiry.
    fn pending_timer_records(&self) -> BoxFuture<'static, DirectoryResult<Vec<ActiveTimerRecord>>>;

    /// Active games with a scheduled coin-consume deadline.
    fn coin_consume_records(&self) -> BoxFuture<'static, DirectoryResult<Vec<CoinConsumeRecord>>>;
}
