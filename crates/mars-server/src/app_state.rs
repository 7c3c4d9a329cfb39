//! Shared application state for the MARS server.
//!
//! Built once in `main` (or in a test) and handed to the router.

use std::sync::Arc;

use crate::config::EffectiveConfig;
use crate::counter::VisitCounter;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: EffectiveConfig,
    counter: VisitCounter,
}

impl AppState {
    pub fn new(cfg: EffectiveConfig, counter: VisitCounter) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, counter }),
        }
    }

    pub fn cfg(&self) -> &EffectiveConfig {
        &self.inner.cfg
    }

    pub fn counter(&self) -> &VisitCounter {
        &self.inner.counter
    }
}
