use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Settings,
    peers::{SHORT_REQUEST_TIMEOUT, error::PeerResult, post_no_body},
};

/// Client for the deferred-work scheduler peer.
#[derive(Clone)]
pub struct SchedulerClient {
    http: Client,
    base_url: Arc<str>,
    enabled: bool,
}

impl SchedulerClient {
    /// Build the client around the shared HTTP pool.
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            base_url: Arc::from(settings.scheduler_url.trim_end_matches('/')),
            enabled: settings.notify_peers,
        }
    }

    /// Ask the scheduler to run post-game processing for a finished game.
    ///
    /// Failure propagates so the teardown flow can decide what to do with
    /// it; in practice it logs and continues, since post-processing can be
    /// re-triggered out of band.
    pub async fn schedule_post_processing(&self, game_id: u64) -> PeerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!(
            "{}/schedule-game-post-process?game-id={game_id}",
            self.base_url
        );
        post_no_body(&self.http, &url, SHORT_REQUEST_TIMEOUT).await
    }
}
