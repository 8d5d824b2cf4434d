//! Typed HTTP clients for the independently deployed peer services.
//!
//! Each client is constructed once with the shared pooled HTTP client and the
//! immutable [`Settings`](crate::config::Settings); the notify gate is checked
//! before any network I/O and a disabled gate short-circuits every operation
//! into a success-shaped return.
//!
//! Operations come in two flavors, expressed structurally in the signatures:
//! *authoritative* calls return [`error::PeerResult`] and the caller's flow
//! depends on the outcome, while *advisory* calls return `()` and log
//! failures internally, because the peer reconciles on its own.

/// Bot-seating service client.
pub mod botrunner;
/// Failure taxonomy shared by every peer client.
pub mod error;
/// Game-execution server client.
pub mod game_server;
/// Game-server assignment resolution.
pub mod locator;
/// Wire payloads exchanged with the peers.
pub mod messages;
/// Deferred post-processing scheduler client.
pub mod scheduler;
/// Expiring-timer service client.
pub mod timer;

use std::time::Duration;

use reqwest::{Client, StatusCode};

use self::error::{PeerError, PeerResult};

/// Timeout for timer and scheduler requests; these peers answer from memory.
pub(crate) const SHORT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);
/// Timeout for game-server requests, which may touch table state.
pub(crate) const GAME_SERVER_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for bot-runner batch calls that boot bots synchronously.
pub(crate) const BOT_BATCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the pooled HTTP client shared by every peer client.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder().build()
}

/// POST to `url` with no body and succeed only on HTTP 200.
///
/// The peers treat anything but 200 as "not applied", so the strict check
/// mirrors their contract rather than accepting the whole 2xx class.
pub(crate) async fn post_no_body(client: &Client, url: &str, timeout: Duration) -> PeerResult<()> {
    let response = client
        .post(url)
        .timeout(timeout)
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
