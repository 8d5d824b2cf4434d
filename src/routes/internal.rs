use axum::{Json, Router, extract::State, routing::post};
use tracing::info;

use crate::{dto::internal::RecoveryResponse, error::AppError, state::SharedState};

/// Operator endpoints reconciling peer state after restarts.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/internal/restart-timers", post(restart_timers))
}

#[utoipa::path(
    post,
    path = "/internal/restart-timers",
    tag = "internal",
    responses(
        (status = 200, description = "Every pending timer was re-armed", body = RecoveryResponse),
        (status = 500, description = "One or more timers could not be re-armed"),
    )
)]
/// Re-arm timers from persisted state, e.g. after a timer-peer restart.
///
/// A record whose retries are exhausted means a player-facing timeout may
/// never fire, so partial failure is surfaced to the operator as a 500 with
/// the per-record detail instead of being dropped.
pub async fn restart_timers(
    State(state): State<SharedState>,
) -> Result<Json<RecoveryResponse>, AppError> {
    info!("timer recovery scan requested");
    let report = state
        .recovery()
        .scan()
        .await
        .map_err(|error| AppError::Internal(error.to_string()))?;

    if !report.is_clean() {
        let detail = report
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::Internal(format!(
            "failed to re-arm {} timer(s), {} skipped: {detail}",
            report.failures.len(),
            report.skipped,
        )));
    }

    Ok(Json(RecoveryResponse::ok(report.rearmed)))
}
