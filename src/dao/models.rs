use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle status of a poker game as persisted by the API tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Placeholder for rows predating the status column.
    Unknown,
    /// Game exists but has not been opened for seating.
    Configured,
    /// Game is live; only active games participate in timer recovery.
    Active,
    /// Host paused the game.
    Paused,
    /// Game finished and is awaiting post-processing.
    Ended,
}

/// Seating status of a player within a game, mirrored to the game peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// Registered but not seated.
    NotPlaying,
    /// Seated and dealt in.
    Playing,
    /// Waiting for a seat to open.
    InQueue,
    /// On a break, seat reserved.
    InBreak,
    /// Leaving the seat at the next hand boundary.
    StandingUp,
    /// Left the table.
    Left,
    /// Removed by the host.
    KickedOut,
    /// Blocked from re-joining.
    Blocked,
    /// Connection to the client lost mid-hand.
    LostConnection,
    /// Seated, waiting for the buy-in to be approved or funded.
    WaitForBuyin,
    /// Leave requested while a hand is running.
    LeavingGame,
    /// Break requested while a hand is running.
    TakingBreak,
    /// Join in progress.
    Joining,
    /// Being seated from the waitlist.
    WaitlistSeating,
}

/// Pending per-player change the game peer applies at the next hand boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerUpdateKind {
    /// No pending change.
    Unknown,
    /// Seat-change request.
    SwitchSeat,
    /// Break starts after the current hand.
    TakeBreak,
    /// Chip reload applies after the current hand.
    ReloadChips,
    /// Player returns from a break.
    BackFromBreak,
    /// Player left the game.
    LeftTheGame,
    /// Stack reached zero; seat pending a new buy-in.
    EmptyStack,
    /// A fresh buy-in was approved.
    NewBuyin,
}

/// A deployed game-execution peer able to host tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameServer {
    /// Registry id of the peer.
    pub id: u64,
    /// Base URL the peer listens on.
    pub url: String,
}

/// The slice of a persisted poker game the coordination layer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Database id of the game.
    pub id: u64,
    /// Human-facing join code.
    pub game_code: String,
}

/// Player identity forwarded to the game peer on status changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Database id of the player.
    pub id: u64,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
}

/// Row for a game in [`GameStatus::Active`] whose tracker still carries a
/// buy-in or break expiry. Source of truth for the recovery scan; written by
/// the game lifecycle logic, only ever read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTimerRecord {
    /// Game the timer belongs to.
    pub game_id: u64,
    /// Player the timer belongs to.
    pub player_id: u64,
    /// Deadline for completing a pending buy-in, if one is open.
    pub buyin_exp_at: Option<OffsetDateTime>,
    /// Deadline for returning from a break, if one is running.
    pub break_exp_at: Option<OffsetDateTime>,
}

/// Active game whose next coin consumption is already scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinConsumeRecord {
    /// Game the consumption applies to.
    pub game_id: u64,
    /// Human-facing join code, used in operator logs.
    pub game_code: String,
    /// Instant at which the next consumption is due.
    pub consume_at: OffsetDateTime,
}
