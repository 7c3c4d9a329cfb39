//! Axum router wiring.

use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{app_state::AppState, ops, visits};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(visits::hello))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/ready", get(ops::ready))
        .fallback(ops::not_found)
        .layer(CatchPanicLayer::custom(ops::internal_error))
        .with_state(state)
}
