//! MARS server library entry.
//!
//! Config resolution, the visit counter facade and its store backends, and
//! the HTTP routes. Consumed by the binary (`main.rs`) and by integration
//! tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod counter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod visits;
