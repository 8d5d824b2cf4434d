use std::sync::Arc;

use crate::{
    config::Settings,
    dao::directory::GameDirectory,
    peers::{
        botrunner::BotRunnerClient, build_http_client, game_server::GameServerClient,
        locator::PeerLocator, scheduler::SchedulerClient, timer::TimerClient,
    },
    services::recovery_service::{RecoveryPolicy, RecoveryScanner},
};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the immutable settings, the persistence
/// directory handle, and the typed peer clients built over one pooled HTTP
/// client. Everything here is read-only after construction; all mutation
/// happens at the remote peers.
pub struct AppState {
    settings: Settings,
    directory: Arc<dyn GameDirectory>,
    game_server: GameServerClient,
    timer: TimerClient,
    scheduler: SchedulerClient,
    botrunner: BotRunnerClient,
    recovery: RecoveryScanner,
}

impl AppState {
    /// Construct the shared state, wiring every peer client onto a single
    /// connection-pooled HTTP client.
    pub fn new(
        settings: Settings,
        directory: Arc<dyn GameDirectory>,
    ) -> reqwest::Result<SharedState> {
        let http = build_http_client()?;
        let locator = PeerLocator::new(directory.clone());

        let game_server = GameServerClient::new(http.clone(), locator, &settings);
        let timer = TimerClient::new(http.clone(), &settings);
        let scheduler = SchedulerClient::new(http.clone(), &settings);
        let botrunner = BotRunnerClient::new(http, &settings);

        let recovery = RecoveryScanner::new(
            directory.clone(),
            timer.clone(),
            RecoveryPolicy::from_settings(&settings),
        );

        Ok(Arc::new(Self {
            settings,
            directory,
            game_server,
            timer,
            scheduler,
            botrunner,
            recovery,
        }))
    }

    /// Runtime settings the process was started with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Persistence directory consumed by the coordination layer.
    pub fn directory(&self) -> &Arc<dyn GameDirectory> {
        &self.directory
    }

    /// Client for the game-execution peer.
    pub fn game_server(&self) -> &GameServerClient {
        &self.game_server
    }

    /// Client for the timer peer.
    pub fn timer(&self) -> &TimerClient {
        &self.timer
    }

    /// Client for the post-processing scheduler peer.
    pub fn scheduler(&self) -> &SchedulerClient {
        &self.scheduler
    }

    /// Client for the bot-seating peer.
    pub fn botrunner(&self) -> &BotRunnerClient {
        &self.botrunner
    }

    /// Recovery scanner replaying persisted timer state.
    pub fn recovery(&self) -> &RecoveryScanner {
        &self.recovery
    }
}
