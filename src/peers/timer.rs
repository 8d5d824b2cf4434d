use std::fmt;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    config::Settings,
    peers::{
        SHORT_REQUEST_TIMEOUT,
        error::{PeerError, PeerResult},
        messages::TimerPayload,
        post_no_body,
    },
};

/// Closed set of reasons a coordination timer can be armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerPurpose {
    /// Window for a seated player to complete a pending buy-in.
    BuyinTimeout,
    /// Window for a player to return from a break.
    BreakTimeout,
    /// Deadline for the next game-coin consumption tick.
    GameCoinConsumeTime,
}

impl TimerPurpose {
    /// Wire token understood by the timer peer.
    pub fn as_str(self) -> &'static str {
        match self {
            TimerPurpose::BuyinTimeout => "BUYIN_TIMEOUT",
            TimerPurpose::BreakTimeout => "BREAK_TIMEOUT",
            TimerPurpose::GameCoinConsumeTime => "GAME_COIN_CONSUME_TIME",
        }
    }
}

impl fmt::Display for TimerPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for the expiring-timer peer.
///
/// A timer is identified by `(game_id, player_id, purpose)` and the peer
/// upserts on that key: reissuing a start replaces the previous deadline
/// instead of arming a second timer. The client keeps no dedup state of its
/// own, because the peer is the sole source of truth for what is armed.
#[derive(Clone)]
pub struct TimerClient {
    http: Client,
    base_url: Arc<str>,
    enabled: bool,
}

impl TimerClient {
    /// Build the client around the shared HTTP pool.
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            base_url: Arc::from(settings.timer_url.trim_end_matches('/')),
            enabled: settings.notify_peers,
        }
    }

    /// Arm (or re-arm) the timer identified by `(game_id, player_id,
    /// purpose)` to fire at `expires_at`. Failure propagates; callers retry
    /// (the recovery scan) or fail the enclosing operation.
    pub async fn start(
        &self,
        game_id: u64,
        player_id: u64,
        purpose: TimerPurpose,
        expires_at: OffsetDateTime,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let timeout_at = expires_at.unix_timestamp();
        let url = format!(
            "{}/start-timer?game-id={game_id}&player-id={player_id}&purpose={}&timeout-at={timeout_at}",
            self.base_url,
            purpose.as_str(),
        );
        post_no_body(&self.http, &url, SHORT_REQUEST_TIMEOUT).await
    }

    /// Cancel the timer identified by `(game_id, player_id, purpose)`.
    ///
    /// Failure propagates, but cancelling an already-fired or already-gone
    /// timer is not a correctness problem, so callers typically log and
    /// move on.
    pub async fn cancel(
        &self,
        game_id: u64,
        player_id: u64,
        purpose: TimerPurpose,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!(
            "{}/cancel-timer?game-id={game_id}&player-id={player_id}&purpose={}",
            self.base_url,
            purpose.as_str(),
        );
        post_no_body(&self.http, &url, SHORT_REQUEST_TIMEOUT).await
    }

    /// Arm a timer that carries an opaque payload instead of a seat key; the
    /// peer echoes the payload back when the timer fires.
    pub async fn start_with_payload(
        &self,
        payload: &serde_json::Value,
        expires_at: OffsetDateTime,
    ) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let timeout_at = expires_at.unix_timestamp();
        let url = format!("{}/start-timer?timeout-at={timeout_at}", self.base_url);
        let body = TimerPayload {
            payload: payload.to_string(),
        };
        self.post_payload(&url, &body).await
    }

    /// Cancel a payload-keyed timer.
    pub async fn cancel_with_payload(&self, payload: &serde_json::Value) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!("{}/cancel-timer", self.base_url);
        let body = TimerPayload {
            payload: payload.to_string(),
        };
        self.post_payload(&url, &body).await
    }

    async fn post_payload(&self, url: &str, body: &TimerPayload) -> PeerResult<()> {
        let response = self
            .http
            .post(url)
            .timeout(SHORT_REQUEST_TIMEOUT)
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
