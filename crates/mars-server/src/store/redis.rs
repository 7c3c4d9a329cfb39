use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError, RedisResult};
use tracing::{debug, info};

use super::{CounterStore, StoreError, StoreResult};

/// Re-dial attempts per dropped connection.
const RECONNECT_RETRIES: usize = 1;
const RECONNECT_BACKOFF_BASE: u64 = 2;
const RECONNECT_BACKOFF_FACTOR_MS: u64 = 100;

/// Redis-backed counter store.
///
/// The handle is built once. `ConnectionManager` swaps in a fresh socket
/// after a dropped connection, so a store restart fails one call and the
/// next one goes through.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Open the connection and confirm it with a `PING`.
    pub async fn connect(url: &str, timeout: Duration) -> StoreResult<Self> {
        info!(%url, "connecting to redis");

        let client = Client::open(url).map_err(classify)?;
        let manager = ConnectionManager::new_with_backoff(
            client,
            RECONNECT_BACKOFF_BASE,
            RECONNECT_BACKOFF_FACTOR_MS,
            RECONNECT_RETRIES,
        );
        let conn = tokio::time::timeout(timeout, manager)
            .await
            .map_err(|_| StoreError::Unavailable(format!("connect timed out after {timeout:?}")))?
            .map_err(classify)?;

        let store = Self { conn, timeout };
        store.ping().await?;
        Ok(store)
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res.map_err(classify),
            Err(_) => Err(StoreError::Unavailable(format!(
                "{op} timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

fn classify(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_timeout() || e.is_connection_refusal() || e.is_connection_dropped() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Protocol(e.to_string())
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _pong: String = self
            .bounded("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<i64>> {
        debug!(%key, "GET");
        let mut conn = self.conn.clone();
        self.bounded("GET", conn.get(key)).await
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        debug!(%key, "INCR");
        let mut conn = self.conn.clone();
        self.bounded("INCR", conn.incr(key, 1i64)).await
    }
}
