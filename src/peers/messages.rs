//! Wire payloads exchanged with the peer services.
//!
//! These are ephemeral request/response bodies, distinct from the persisted
//! entities in [`crate::dao::models`]; field names follow the peers' JSON
//! contracts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{PlayerStatus, PlayerUpdateKind};

/// Tag carried by every seat-level notification so the game peer can select
/// the interpretation of the body.
pub const PLAYER_UPDATE_TYPE: &str = "PlayerUpdate";

/// Announcement asking a game server to host a newly created game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameMessage {
    /// Database id of the game.
    pub game_id: u64,
    /// Human-facing join code.
    pub game_code: String,
    /// True when the announcement replays an already-known game after a
    /// restart rather than introducing a new one.
    pub is_restart: bool,
}

/// Acknowledgment returned by the game server for a new-game announcement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameAck {
    /// The peer's view of the table lifecycle after accepting the game.
    pub table_status: String,
}

/// Tagged seat-level notification pushed to the game server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdateMessage {
    /// Always [`PLAYER_UPDATE_TYPE`].
    #[serde(rename = "type")]
    pub message_type: &'static str,
    /// Database id of the game.
    pub game_id: u64,
    /// Database id of the player.
    pub player_id: u64,
    /// Stable external identifier of the player.
    pub player_uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Seat number the update applies to.
    pub seat_no: u32,
    /// Stack size after the change.
    pub stack: f64,
    /// Seating status at the time of the notification.
    pub status: PlayerStatus,
    /// The pending change the peer applies at the next hand boundary.
    pub new_update: PlayerUpdateKind,
}

/// Request asking the bot runner to seat bots into a tournament.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTournamentMessage {
    /// Tournament the bots should register for.
    pub tournament_id: u64,
    /// How many bots to register.
    pub bot_count: u32,
}

/// Body wrapper for payload-carrying timer requests.
#[derive(Debug, Clone, Serialize)]
pub struct TimerPayload {
    /// Opaque JSON the timer peer echoes back on expiry.
    pub payload: String,
}
