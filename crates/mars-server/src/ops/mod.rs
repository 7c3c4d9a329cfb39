//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, `degraded` (still 200) when the store is down
//! - `/ready`   : readiness, 503 when the store is unreachable
//! - `/metrics` : plain `name value` lines
//!
//! Also the JSON fallbacks for unmatched routes and handler panics.

use std::any::Any;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use mars_core::{StoreStatus, APP_VERSION};

use crate::app_state::AppState;
use crate::obs::metrics;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub redis: StoreStatus,
    pub version: &'static str,
}

impl HealthReport {
    pub fn from_status(redis: StoreStatus) -> Self {
        let status = match redis {
            StoreStatus::Connected => "healthy",
            StoreStatus::Disconnected => "degraded",
        };
        Self {
            status,
            timestamp: utc_isoformat(),
            redis,
            version: APP_VERSION,
        }
    }
}

/// Naive UTC timestamp with microseconds and no offset,
/// e.g. `2024-05-01T12:00:00.123456`.
pub fn utc_isoformat() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let report = HealthReport::from_status(state.counter().store_status().await);
    if report.redis == StoreStatus::Disconnected {
        tracing::warn!("health degraded: redis disconnected");
    }
    (StatusCode::OK, Json(report))
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.counter().is_alive().await {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready", "reason": "redis unavailable" })),
        )
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let counter = state.counter();
    match counter.read().await {
        Ok(visits) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            metrics::render(visits, counter.handle_state()),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "metrics endpoint failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, TEXT_PLAIN)],
                metrics::render_error(&e.to_string()),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Response for a handler that panicked. The connection task survives.
pub fn internal_error(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(%detail, "internal server error");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
