//! DTO definitions used by the internal operator API.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome summary returned by the manual timer-recovery endpoint on full
/// success; partial failures surface as an error response instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecoveryResponse {
    /// Always "OK" when returned.
    pub status: String,
    /// Number of timers re-armed at the timer peer.
    pub rearmed: usize,
}

impl RecoveryResponse {
    /// Acknowledge a clean scan that re-armed `rearmed` timers.
    pub fn ok(rearmed: usize) -> Self {
        Self {
            status: "OK".to_string(),
            rearmed,
        }
    }
}
