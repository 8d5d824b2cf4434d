use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, currently always "ok".
    pub status: String,
    /// Whether outbound peer notification is active in this process.
    pub peer_notification: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(peer_notification: bool) -> Self {
        Self {
            status: "ok".to_string(),
            peer_notification,
        }
    }
}
