//! Startup reconciliation of the timer peer against persisted state.
//!
//! After an API-tier restart nothing guarantees the timer peer still holds
//! the timers the database says should be live (the peer may itself have
//! restarted and it does not persist its timers). The scanner replays them:
//! a lost buy-in or break timer would otherwise leave a player or seat in
//! limbo until someone notices.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::{
    config::Settings,
    dao::{
        directory::{DirectoryError, GameDirectory},
        models::ActiveTimerRecord,
    },
    peers::{
        error::PeerError,
        timer::{TimerClient, TimerPurpose},
    },
};

/// Retry and failure-isolation policy for a recovery scan.
#[derive(Debug, Clone)]
pub struct RecoveryPolicy {
    /// Total start attempts per record before it is marked failed.
    pub max_attempts: u32,
    /// Constant wait between failed attempts. Deliberately not exponential:
    /// the timer peer either comes back within this window or not at all.
    pub retry_delay: Duration,
    /// Abort the remaining queue on the first exhausted record (the legacy
    /// behavior) instead of continuing and aggregating failures.
    pub halt_on_failure: bool,
}

impl RecoveryPolicy {
    /// Attempts per record used in production.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    /// Spacing between attempts used in production.
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

    /// Derive the policy from runtime settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            halt_on_failure: settings.recovery_halt_on_failure,
            ..Self::default()
        }
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
            halt_on_failure: false,
        }
    }
}

/// The scan could not enumerate persisted timer state at all.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// Reading the directory failed before any record was attempted.
    #[error("failed to load persisted timer state")]
    Directory(#[from] DirectoryError),
}

/// One timer the scan could not re-arm after exhausting its attempts.
#[derive(Debug)]
pub struct RecoveryFailure {
    /// Game the timer belongs to.
    pub game_id: u64,
    /// Player the timer belongs to (0 for game-level timers).
    pub player_id: u64,
    /// What the timer was armed for.
    pub purpose: TimerPurpose,
    /// Deadline the timer should have fired at.
    pub expires_at: OffsetDateTime,
    /// The error returned by the final attempt.
    pub error: PeerError,
}

impl fmt::Display for RecoveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game {} player {} purpose {}: {}",
            self.game_id, self.player_id, self.purpose, self.error
        )
    }
}

/// Outcome of a full recovery scan.
#[derive(Debug, Default)]
pub struct RecoveryReport {
    /// Timers successfully re-armed.
    pub rearmed: usize,
    /// Records whose retries were exhausted.
    pub failures: Vec<RecoveryFailure>,
    /// Records never attempted because the scan halted early.
    pub skipped: usize,
}

impl RecoveryReport {
    /// True when every derived timer was re-armed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replays timers the persisted state says should be live.
pub struct RecoveryScanner {
    directory: Arc<dyn GameDirectory>,
    timer: TimerClient,
    policy: RecoveryPolicy,
}

impl RecoveryScanner {
    /// Build a scanner over the persistence directory and timer client.
    pub fn new(
        directory: Arc<dyn GameDirectory>,
        timer: TimerClient,
        policy: RecoveryPolicy,
    ) -> Self {
        Self {
            directory,
            timer,
            policy,
        }
    }

    /// Run the full scan: buy-in/break timers first, then coin-consume
    /// deadlines. Per-record progression is Pending → Retrying(n) →
    /// Armed | Failed; a Failed record either halts the scan (legacy policy)
    /// or is recorded while the scan continues.
    pub async fn scan(&self) -> Result<RecoveryReport, RecoveryError> {
        let mut queue: Vec<(u64, u64, TimerPurpose, OffsetDateTime)> = Vec::new();

        for record in self.directory.pending_timer_records().await? {
            if let Some((purpose, expires_at)) = derive_timer(&record) {
                queue.push((record.game_id, record.player_id, purpose, expires_at));
            }
        }
        for record in self.directory.coin_consume_records().await? {
            // Game-level timer, keyed with player id 0.
            queue.push((
                record.game_id,
                0,
                TimerPurpose::GameCoinConsumeTime,
                record.consume_at,
            ));
        }

        let mut report = RecoveryReport::default();
        for (index, &(game_id, player_id, purpose, expires_at)) in queue.iter().enumerate() {
            match self.rearm(game_id, player_id, purpose, expires_at).await {
                Ok(()) => report.rearmed += 1,
                Err(failure) => {
                    error!(
                        game_id,
                        player_id,
                        purpose = %purpose,
                        error = %failure,
                        "giving up on timer after {} attempts",
                        self.policy.max_attempts
                    );
                    report.failures.push(RecoveryFailure {
                        game_id,
                        player_id,
                        purpose,
                        expires_at,
                        error: failure,
                    });
                    if self.policy.halt_on_failure {
                        report.skipped = queue.len() - index - 1;
                        break;
                    }
                }
            }
        }

        info!(
            rearmed = report.rearmed,
            failed = report.failures.len(),
            skipped = report.skipped,
            "timer recovery scan finished"
        );
        Ok(report)
    }

    /// Re-arm one timer with bounded retry and constant backoff.
    async fn rearm(
        &self,
        game_id: u64,
        player_id: u64,
        purpose: TimerPurpose,
        expires_at: OffsetDateTime,
    ) -> Result<(), PeerError> {
        let mut attempt = 1;
        loop {
            info!(
                game_id,
                player_id,
                purpose = %purpose,
                expires_at = %expires_at,
                attempt,
                "restarting timer"
            );
            match self.timer.start(game_id, player_id, purpose, expires_at).await {
                Ok(()) => return Ok(()),
                Err(failure) if attempt >= self.policy.max_attempts => return Err(failure),
                Err(failure) => {
                    warn!(
                        game_id,
                        player_id,
                        purpose = %purpose,
                        attempt,
                        error = %failure,
                        "timer restart attempt failed; backing off"
                    );
                    sleep(self.policy.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Derive the timer owed for a tracker row. Buy-in expiry takes precedence
/// when both columns are set; rows with neither yield nothing.
fn derive_timer(record: &ActiveTimerRecord) -> Option<(TimerPurpose, OffsetDateTime)> {
    if let Some(expires_at) = record.buyin_exp_at {
        Some((TimerPurpose::BuyinTimeout, expires_at))
    } else {
        record
            .break_exp_at
            .map(|expires_at| (TimerPurpose::BreakTimeout, expires_at))
    }
}
