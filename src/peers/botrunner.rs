use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tracing::warn;

use crate::{
    config::Settings,
    peers::{
        BOT_BATCH_TIMEOUT, SHORT_REQUEST_TIMEOUT,
        error::{PeerError, PeerResult},
        messages::RegisterTournamentMessage,
        post_no_body,
    },
};

/// Client for the bot-seating peer that fills tables with scripted players.
#[derive(Clone)]
pub struct BotRunnerClient {
    http: Client,
    base_url: Arc<str>,
    enabled: bool,
}

impl BotRunnerClient {
    /// Build the client around the shared HTTP pool.
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            base_url: Arc::from(settings.botrunner_url.trim_end_matches('/')),
            enabled: settings.notify_peers,
        }
    }

    /// Seat bots at a human-hosted game.
    ///
    /// Authoritative: the host asked for bots and needs to know whether the
    /// seats were filled. The peer boots bots synchronously, so this call
    /// carries the long batch timeout.
    pub async fn fill_seats(
        &self,
        club_code: &str,
        game_id: u64,
        game_code: &str,
        demo_game: bool,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!(
            "{}/join-human-game?club-code={club_code}&game-id={game_id}&game-code={game_code}&demo-game={}",
            self.base_url,
            u8::from(demo_game),
        );
        post_no_body(&self.http, &url, BOT_BATCH_TIMEOUT).await
    }

    /// Register bots into a tournament ahead of its start. Advisory: a
    /// tournament without its bots still runs, so failures are logged and
    /// swallowed.
    pub async fn register_tournament(&self, tournament_id: u64, bot_count: u32) {
        if let Err(error) = self.try_register_tournament(tournament_id, bot_count).await {
            warn!(
                tournament_id,
                bot_count,
                error = %error,
                "failed to register bots for tournament"
            );
        }
    }

    async fn try_register_tournament(&self, tournament_id: u64, bot_count: u32) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!("{}/register-tournament", self.base_url);
        let message = RegisterTournamentMessage {
            tournament_id,
            bot_count,
        };
        let response = self
            .http
            .post(&url)
            .timeout(BOT_BATCH_TIMEOUT)
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
        Ok(())
    }

    /// Tell the bot runner a tournament is over so it can reclaim its bots.
    /// Advisory.
    pub async fn end_tournament(&self, tournament_id: u64) {
        if let Err(error) = self.try_end_tournament(tournament_id).await {
            warn!(tournament_id, error = %error, "failed to end tournament on bot runner");
        }
    }

    async fn try_end_tournament(&self, tournament_id: u64) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!(
            "{}/end-tournament?tournament-id={tournament_id}",
            self.base_url
        );
        post_no_body(&self.http, &url, SHORT_REQUEST_TIMEOUT).await
    }
}
