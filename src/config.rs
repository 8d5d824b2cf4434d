//! Process configuration for peer coordination, read once at startup.

use std::env;

use tracing::info;

/// Environment toggle enabling outbound peer notification.
const NOTIFY_ENV: &str = "NOTIFY_GAME_SERVER";
/// Base-URL override for the timer service.
const TIMER_URL_ENV: &str = "TIMER_URL";
/// Base-URL override for the post-processing scheduler.
const SCHEDULER_URL_ENV: &str = "SCHEDULER_URL";
/// Base-URL override for the bot-seating service.
const BOTRUNNER_URL_ENV: &str = "BOTRUNNER_URL";
/// Debug toggle that pins the bot runner to its local default URL.
const DEBUG_BOTRUNNER_ENV: &str = "DEBUG_BOTRUNNER";
/// Opt-in to the historical halt-on-first-failure recovery policy.
const RECOVERY_HALT_ENV: &str = "RECOVERY_HALT_ON_FAILURE";

/// Fallback timer service address when no override is configured.
const DEFAULT_TIMER_URL: &str = "http://localhost:8082";
/// Fallback scheduler address when no override is configured.
const DEFAULT_SCHEDULER_URL: &str = "http://localhost:8083";
/// Fallback bot runner address, also forced by [`DEBUG_BOTRUNNER_ENV`].
const DEFAULT_BOTRUNNER_URL: &str = "http://localhost:8081";

/// Immutable runtime settings injected into every peer client.
///
/// Built once in [`Settings::from_env`] and never mutated afterwards, so the
/// notify gate observed by a client is fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Master gate: when false, no client performs any network I/O.
    pub notify_peers: bool,
    /// Base URL of the timer service.
    pub timer_url: String,
    /// Base URL of the post-processing scheduler.
    pub scheduler_url: String,
    /// Base URL of the bot-seating service.
    pub botrunner_url: String,
    /// Continue the recovery scan past a record whose retries are exhausted
    /// (default), or halt the whole scan as the legacy behavior did.
    pub recovery_halt_on_failure: bool,
}

impl Settings {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        let notify_peers = flag_set(NOTIFY_ENV);
        if notify_peers {
            info!("peer notification is enabled");
        } else {
            info!("peer notification is disabled");
        }

        let botrunner_url = if flag_set(DEBUG_BOTRUNNER_ENV) {
            DEFAULT_BOTRUNNER_URL.to_string()
        } else {
            url_or(BOTRUNNER_URL_ENV, DEFAULT_BOTRUNNER_URL)
        };

        Self {
            notify_peers,
            timer_url: url_or(TIMER_URL_ENV, DEFAULT_TIMER_URL),
            scheduler_url: url_or(SCHEDULER_URL_ENV, DEFAULT_SCHEDULER_URL),
            botrunner_url,
            recovery_halt_on_failure: flag_set(RECOVERY_HALT_ENV),
        }
    }
}

impl Default for Settings {
    /// Settings equivalent to an empty environment: notification disabled,
    /// every peer at its local default address.
    fn default() -> Self {
        Self {
            notify_peers: false,
            timer_url: DEFAULT_TIMER_URL.to_string(),
            scheduler_url: DEFAULT_SCHEDULER_URL.to_string(),
            botrunner_url: DEFAULT_BOTRUNNER_URL.to_string(),
            recovery_halt_on_failure: false,
        }
    }
}

/// True when the variable is set to the literal `1`.
fn flag_set(var: &str) -> bool {
    env::var(var).is_ok_and(|value| value == "1")
}

/// Value of `var`, trimmed of a trailing slash, or `default` when unset or empty.
fn url_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(|value| value.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}
