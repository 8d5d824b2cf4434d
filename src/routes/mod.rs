use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod internal;

/// Compose the health, internal, and documentation route trees over the
/// shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(internal::router())
        .merge(docs::router())
        .with_state(state)
}
