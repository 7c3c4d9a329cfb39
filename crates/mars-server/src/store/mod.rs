//! Store seam for the visit counter.
//!
//! Only three commands are ever issued: `PING`, `GET`, `INCR`.

pub mod memory;
pub mod redis;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use mars_core::error::MarsError;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Bound on connect and on every single command.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum StoreError {
    /// Refused, dropped, timed out.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// The store replied with something other than what we asked for.
    #[error("protocol: {0}")]
    Protocol(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for MarsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(m) => MarsError::StoreUnavailable(m),
            StoreError::Protocol(m) => MarsError::Store(m),
        }
    }
}

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Liveness round-trip.
    async fn ping(&self) -> StoreResult<()>;
    /// `None` when the key does not exist yet.
    async fn get(&self, key: &str) -> StoreResult<Option<i64>>;
    /// Atomic increment by one, returns the new value.
    async fn incr(&self, key: &str) -> StoreResult<i64>;
}
