use std::sync::Mutex;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{
    directory::{DirectoryResult, GameDirectory},
    models::{ActiveTimerRecord, CoinConsumeRecord, GameServer},
};

/// In-memory [`GameDirectory`] used by the binary until a database-backed
/// directory is wired in, and by the test suites to stage records.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    servers: DashMap<u64, GameServer>,
    timer_records: Mutex<Vec<ActiveTimerRecord>>,
    coin_records: Mutex<Vec<CoinConsumeRecord>>,
}

impl InMemoryDirectory {
    /// Record which game server hosts `game_id`.
    pub fn assign_server(&self, game_id: u64, server: GameServer) {
        self.servers.insert(game_id, server);
    }

    /// Drop the assignment for `game_id`, e.g. after teardown.
    pub fn clear_server(&self, game_id: u64) {
        self.servers.remove(&game_id);
    }

    /// Stage a pending buy-in/break expiry row.
    pub fn push_timer_record(&self, record: ActiveTimerRecord) {
        self.timer_records
            .lock()
            .expect("timer records lock poisoned")
            .push(record);
    }

    /// Stage a coin-consume deadline row.
    pub fn push_coin_record(&self, record: CoinConsumeRecord) {
        self.coin_records
            .lock()
            .expect("coin records lock poisoned")
            .push(record);
    }
}

impl GameDirectory for InMemoryDirectory {
    fn game_server(&self, game_id: u64) -> BoxFuture<'static, DirectoryResult<Option<GameServer>>> {
        let server = self.servers.get(&game_id).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(server) })
    }

    fn pending_timer_records(&self) -> BoxFuture<'static, DirectoryResult<Vec<ActiveTimerRecord>>> {
        let records = self
            .timer_records
            .lock()
            .expect("timer records lock poisoned")
            .clone();
        Box::pin(async move { Ok(records) })
    }

    fn coin_consume_records(&self) -> BoxFuture<'static, DirectoryResult<Vec<CoinConsumeRecord>>> {
        let records = self
            .coin_records
            .lock()
            .expect("coin records lock poisoned")
            .clone();
        Box::pin(async move { Ok(records) })
    }
}
