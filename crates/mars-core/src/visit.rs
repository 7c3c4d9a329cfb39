//! Counter and store status values shared by handlers and metrics.

use std::fmt;

use serde::Serialize;

/// Result of an increment. `Unknown` when no store handle exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitCount {
    Known(i64),
    Unknown,
}

impl fmt::Display for VisitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitCount::Known(n) => write!(f, "{n}"),
            VisitCount::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for VisitCount {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            VisitCount::Known(n) => s.serialize_i64(*n),
            VisitCount::Unknown => s.serialize_str("unknown"),
        }
    }
}

/// Observed store reachability, from a fresh liveness ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Connected,
    Disconnected,
}

impl StoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Connected => "connected",
            StoreStatus::Disconnected => "disconnected",
        }
    }
}

impl From<bool> for StoreStatus {
    fn from(alive: bool) -> Self {
        if alive {
            StoreStatus::Connected
        } else {
            StoreStatus::Disconnected
        }
    }
}

/// State of the store handle, decided once at startup.
///
/// `Unavailable` is terminal: the handle is never rebuilt, only pinged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Connected,
    Unavailable,
}

impl HandleState {
    /// Gauge value for `mars_redis_connected`.
    pub fn as_gauge(self) -> u8 {
        match self {
            HandleState::Connected => 1,
            HandleState::Unavailable => 0,
        }
    }
}
