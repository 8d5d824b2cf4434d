use std::sync::Arc;

use crate::{
    dao::{directory::GameDirectory, models::GameServer},
    peers::error::{PeerError, PeerResult},
};

/// Resolves which game-execution peer is responsible for a game.
#[derive(Clone)]
pub struct PeerLocator {
    directory: Arc<dyn GameDirectory>,
}

impl PeerLocator {
    /// Wrap the persistence directory for assignment lookups.
    pub fn new(directory: Arc<dyn GameDirectory>) -> Self {
        Self { directory }
    }

    /// Look up the game server assigned to `game_id`.
    ///
    /// `None` is a legitimate answer at several lifecycle points (game not
    /// yet hosted, or already torn down); callers treat it as "skip
    /// silently", never as an error.
    pub async fn locate(&self, game_id: u64) -> PeerResult<Option<GameServer>> {
        self.directory
            .game_server(game_id)
            .await
            .map_err(|source| PeerError::Directory { game_id, source })
    }
}
