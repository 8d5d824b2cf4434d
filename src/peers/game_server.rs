use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::{
    config::Settings,
    dao::models::{GameRecord, GameServer, PlayerRecord, PlayerStatus, PlayerUpdateKind},
    peers::{
        GAME_SERVER_REQUEST_TIMEOUT,
        error::{PeerError, PeerResult},
        locator::PeerLocator,
        messages::{NewGameAck, NewGameMessage, PLAYER_UPDATE_TYPE, PlayerUpdateMessage},
        post_no_body,
    },
};

/// Client for the game-execution peer hosting live tables.
///
/// Authoritative operations ([`announce_new_game`](Self::announce_new_game),
/// [`notify_player_config_update`](Self::notify_player_config_update),
/// [`current_hand_log`](Self::current_hand_log)) return [`PeerResult`];
/// advisory ones return `()` and log failures, since the peer converges
/// through its own polling and the recovery path.
#[derive(Clone)]
pub struct GameServerClient {
    http: Client,
    locator: PeerLocator,
    enabled: bool,
}

impl GameServerClient {
    /// Build the client around the shared HTTP pool and assignment lookup.
    pub fn new(http: Client, locator: PeerLocator, settings: &Settings) -> Self {
        Self {
            http,
            locator,
            enabled: settings.notify_peers,
        }
    }

    /// Ask `server` to host a newly created game.
    ///
    /// On the critical path of game creation: the caller needs the peer's
    /// acknowledgment before opening seating, so any failure propagates.
    /// Returns the peer's table status, or `None` when notification is
    /// disabled.
    pub async fn announce_new_game(
        &self,
        game: &GameRecord,
        server: &GameServer,
        is_restart: bool,
    ) -> PeerResult<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }

        let url = format!("{}/new-game", server.url.trim_end_matches('/'));
        info!(
            game_code = %game.game_code,
            server = %server.url,
            "game server is requested to host game"
        );

        let message = NewGameMessage {
            game_id: game.id,
            game_code: game.game_code.clone(),
            is_restart,
        };
        let response = self
            .http
            .post(&url)
            .timeout(GAME_SERVER_REQUEST_TIMEOUT)
            .json(&message)
            .send()
            .await
            .map_err(|source| PeerError::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(PeerError::Status {
                url,
                status: response.status(),
            });
        }

        let ack = response
            .json::<NewGameAck>()
            .await
            .map_err(|source| PeerError::Decode { url, source })?;
        Ok(Some(ack.table_status))
    }

    /// Tell the peer to resume a paused game. Advisory: a transiently down
    /// peer must not block the caller, so failures are logged and swallowed.
    pub async fn resume_game(&self, game_id: u64) {
        if let Err(error) = self.try_resume_game(game_id).await {
            warn!(game_id, error = %error, "failed to resume game on its game server");
        }
    }

    async fn try_resume_game(&self, game_id: u64) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let Some(server) = self.locator.locate(game_id).await? else {
            return Ok(());
        };
        let url = format!(
            "{}/resume-game?game-id={game_id}",
            server.url.trim_end_matches('/')
        );
        post_no_body(&self.http, &url, GAME_SERVER_REQUEST_TIMEOUT).await
    }

    /// Tell the peer the game has ended. Advisory.
    pub async fn end_game(&self, game_id: u64) {
        if let Err(error) = self.try_end_game(game_id).await {
            warn!(game_id, error = %error, "failed to end game on its game server");
        }
    }

    async fn try_end_game(&self, game_id: u64) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let Some(server) = self.locator.locate(game_id).await? else {
            return Ok(());
        };
        let url = format!(
            "{}/end-game?game-id={game_id}",
            server.url.trim_end_matches('/')
        );
        post_no_body(&self.http, &url, GAME_SERVER_REQUEST_TIMEOUT).await
    }

    /// Push a seat-level status change to the peer. Advisory.
    pub async fn notify_player_status_changed(
        &self,
        game: &GameRecord,
        player: &PlayerRecord,
        status: PlayerStatus,
        new_update: PlayerUpdateKind,
        stack: f64,
        seat_no: u32,
    ) {
        if let Err(error) = self
            .try_notify_player_status_changed(game, player, status, new_update, stack, seat_no)
            .await
        {
            warn!(
                game_id = game.id,
                player_id = player.id,
                error = %error,
                "failed to push player status change to game server"
            );
        }
    }

    async fn try_notify_player_status_changed(
        &self,
        game: &GameRecord,
        player: &PlayerRecord,
        status: PlayerStatus,
        new_update: PlayerUpdateKind,
        stack: f64,
        seat_no: u32,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let Some(server) = self.locator.locate(game.id).await? else {
            return Ok(());
        };

        let url = format!("{}/player-update", server.url.trim_end_matches('/'));
        let message = PlayerUpdateMessage {
            message_type: PLAYER_UPDATE_TYPE,
            game_id: game.id,
            player_id: player.id,
            player_uuid: player.uuid,
            name: player.name.clone(),
            seat_no,
            stack,
            status,
            new_update,
        };
        self.post_json(&url, &message).await
    }

    /// Push an updated per-player game configuration to the peer.
    ///
    /// Authoritative: the peer's copy is what the running table acts on, so
    /// the caller must know whether it was applied. A game with no assigned
    /// peer has no config to push and the call is a silent no-op.
    pub async fn notify_player_config_update(
        &self,
        game_id: u64,
        update: &serde_json::Value,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let Some(server) = self.locator.locate(game_id).await? else {
            return Ok(());
        };
        let url = format!("{}/player-config-update", server.url.trim_end_matches('/'));
        self.post_json(&url, update).await
    }

    /// Fetch the peer's log of the hand currently in progress.
    ///
    /// Authoritative with a hard-required peer: the caller has no fallback
    /// source for the log, so a missing assignment is an error rather than a
    /// skip. Returns `None` only when notification is disabled.
    pub async fn current_hand_log(&self, game_id: u64) -> PeerResult<Option<serde_json::Value>> {
        if !self.enabled {
            return Ok(None);
        }
        let Some(server) = self.locator.locate(game_id).await? else {
            return Err(PeerError::NotAssigned { game_id });
        };

        let url = format!(
            "{}/current-hand-log?game-id={game_id}",
            server.url.trim_end_matches('/')
        );
        let response = self
            .http
            .get(&url)
            .timeout(GAME_SERVER_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| PeerError::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(PeerError::Status {
                url,
                status: response.status(),
            });
        }

        let log = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| PeerError::Decode { url, source })?;
        Ok(Some(log))
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, url: &str, body: &T) -> PeerResult<()> {
        let response = self
            .http
            .post(url)
            .timeout(GAME_SERVER_REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|source| PeerError::Transport {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(PeerError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        Ok(())
    }
}
