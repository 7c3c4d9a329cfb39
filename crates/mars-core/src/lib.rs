//! MARS core: error surface and the counter/status vocabulary.
//!
//! This crate is shared by the server crate and its tests. It carries no
//! runtime or store dependencies so the types stay usable from any context.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod visit;

/// Shared result type.
pub use error::{ErrorCode, MarsError, Result};
pub use visit::{HandleState, StoreStatus, VisitCount};

/// Version reported by `/health`.
pub const APP_VERSION: &str = "2.0.0";

/// The single store key holding the visit counter.
pub const COUNTER_KEY: &str = "hits";
