use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{CounterStore, StoreError, StoreResult};

/// In-process store with `GET`/`INCR` semantics matching Redis.
///
/// Values are kept as strings so a non-integer value fails `INCR`/`GET`
/// the same way a real server would.
pub struct MemoryStore {
    values: DashMap<String, String>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage (`false`) or recovery (`true`).
    pub fn set_available(&self, up: bool) {
        self.available.store(up, Ordering::Relaxed);
    }

    /// Write a raw value, bypassing `INCR`.
    pub fn set_raw(&self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    fn check(&self) -> StoreResult<()> {
        if self.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }
}

fn parse_int(raw: &str) -> StoreResult<i64> {
    raw.parse()
        .map_err(|_| StoreError::Protocol("value is not an integer or out of range".into()))
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }

    async fn get(&self, key: &str) -> StoreResult<Option<i64>> {
        self.check()?;
        match self.values.get(key) {
            Some(v) => parse_int(v.value()).map(Some),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        self.check()?;
        // Entry guard holds the shard lock, so read-modify-write is atomic.
        let mut entry = self.values.entry(key.to_string()).or_insert_with(|| "0".into());
        let next = parse_int(entry.value())?
            .checked_add(1)
            .ok_or_else(|| StoreError::Protocol("increment or decrement would overflow".into()))?;
        *entry = next.to_string();
        Ok(next)
    }
}
