use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the liveness payload and the effective notify-gate state.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.settings().notify_peers)
}
