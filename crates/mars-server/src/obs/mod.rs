//! Observability: log sinks and the `/metrics` text exposition.

pub mod logging;
pub mod metrics;
