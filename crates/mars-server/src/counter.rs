//! Visit counter facade over a single store key.
//!
//! Store failures stop here. Callers get either a degraded value or an
//! explicit `MarsError` whose kind picks the HTTP status.

use std::sync::Arc;

use mars_core::error::Result;
use mars_core::{HandleState, StoreStatus, VisitCount, COUNTER_KEY};

use crate::store::{CounterStore, RedisStore, StoreError, STORE_TIMEOUT};

#[derive(Clone)]
pub struct VisitCounter {
    store: Option<Arc<dyn CounterStore>>,
    key: &'static str,
}

impl VisitCounter {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store: Some(store), key: COUNTER_KEY }
    }

    /// No handle: every call degrades.
    pub fn unavailable() -> Self {
        Self { store: None, key: COUNTER_KEY }
    }

    /// One connect attempt. On failure the handle stays absent for the
    /// lifetime of the process.
    pub async fn connect(url: &str) -> Self {
        match RedisStore::connect(url, STORE_TIMEOUT).await {
            Ok(store) => {
                tracing::info!(%url, "connected to redis");
                Self::new(Arc::new(store))
            }
            Err(e) => {
                tracing::error!(%url, error = %e, "redis connection failed");
                Self::unavailable()
            }
        }
    }

    pub fn handle_state(&self) -> HandleState {
        if self.store.is_some() {
            HandleState::Connected
        } else {
            HandleState::Unavailable
        }
    }

    /// `INCR` and return the new value, or `Unknown` without a handle.
    pub async fn increment_and_read(&self) -> Result<VisitCount> {
        let Some(store) = &self.store else {
            return Ok(VisitCount::Unknown);
        };
        let n = store.incr(self.key).await?;
        Ok(VisitCount::Known(n))
    }

    /// Current value without mutation. Missing key, absent handle and an
    /// unreachable store all read as 0.
    pub async fn read(&self) -> Result<i64> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        match store.get(self.key).await {
            Ok(v) => Ok(v.unwrap_or(0)),
            Err(StoreError::Unavailable(e)) => {
                tracing::warn!(error = %e, "counter read failed, reporting 0");
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fresh `PING`. Never fails.
    pub async fn is_alive(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "liveness ping failed");
                false
            }
        }
    }

    pub async fn store_status(&self) -> StoreStatus {
        StoreStatus::from(self.is_alive().await)
    }
}
