//! Error types shared by the peer clients.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::directory::DirectoryError;

/// Convenient result alias returning [`PeerError`] failures.
pub type PeerResult<T> = Result<T, PeerError>;

/// Failures that can occur while driving a peer service.
#[derive(Debug, Error)]
pub enum PeerError {
    /// The request could not be sent or timed out in flight.
    #[error("failed to reach peer at `{url}`")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The peer answered with something other than HTTP 200.
    #[error("peer at `{url}` answered HTTP {status}")]
    Status { url: String, status: StatusCode },
    /// The response body could not be decoded.
    #[error("failed to decode peer response from `{url}`")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// A peer was required but no assignment exists for the game.
    #[error("no game server assigned to game {game_id}")]
    NotAssigned { game_id: u64 },
    /// The assignment lookup itself failed.
    #[error("game server lookup failed for game {game_id}")]
    Directory {
        game_id: u64,
        #[source]
        source: DirectoryError,
    },
}
