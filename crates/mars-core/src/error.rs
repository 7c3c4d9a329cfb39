//! Shared error type across MARS crates.

use thiserror::Error;

/// Stable error codes, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Config file missing, unreadable or malformed.
    Config,
    /// A port value did not parse.
    InvalidPort,
    /// Store answered, but not with what we asked for.
    Store,
    /// Store could not be reached in time.
    StoreUnavailable,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::InvalidPort => "INVALID_PORT",
            ErrorCode::Store => "STORE",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MarsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MarsError {
    #[error("config: {0}")]
    Config(String),
    #[error("invalid port for {key}: {value:?}")]
    InvalidPort { key: &'static str, value: String },
    #[error("store: {0}")]
    Store(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl MarsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MarsError::Config(_) => ErrorCode::Config,
            MarsError::InvalidPort { .. } => ErrorCode::InvalidPort,
            MarsError::Store(_) => ErrorCode::Store,
            MarsError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// True for failures that a later request may not see again
    /// (connection refused, timeouts).
    pub fn is_transient(&self) -> bool {
        matches!(self, MarsError::StoreUnavailable(_))
    }
}
