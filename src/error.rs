use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::peers::error::PeerError;

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required peer could not be driven.
    #[error("peer unavailable: {0}")]
    PeerUnavailable(String),
    /// Internal server error, including failed recovery scans.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PeerError> for AppError {
    fn from(err: PeerError) -> Self {
        AppError::PeerUnavailable(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::PeerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
