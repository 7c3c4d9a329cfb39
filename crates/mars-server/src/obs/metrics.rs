//! Metric lines for the `/metrics` endpoint.
//!
//! Output is plain `name value` lines in a fixed order, without `# TYPE`
//! headers, so scrapers can split each line on a single space.

use std::fmt::Write;

use mars_core::HandleState;

pub const VISITS_TOTAL: &str = "mars_visits_total";
pub const APP_INFO: &str = "mars_app_info";
pub const REDIS_CONNECTED: &str = "mars_redis_connected";

/// Render the three samples in key order.
pub fn render(visits: i64, handle: HandleState) -> String {
    let samples: [(&str, i64); 3] = [
        (VISITS_TOTAL, visits),
        (APP_INFO, 1),
        (REDIS_CONNECTED, i64::from(handle.as_gauge())),
    ];

    let mut out = String::new();
    for (k, v) in samples {
        let _ = writeln!(out, "{} {}", k, v);
    }
    out
}

/// Body returned when the counter could not be read.
pub fn render_error(msg: &str) -> String {
    format!("# Error collecting metrics: {msg}\n")
}
