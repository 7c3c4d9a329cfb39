//! `/` : increments the visit counter and greets the caller.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::app_state::AppState;
use crate::ops::utc_isoformat;

pub async fn hello(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    match state.counter().increment_and_read().await {
        Ok(count) => {
            let now = Utc::now();
            tracing::info!(
                timestamp = %utc_isoformat(),
                client_ip = %client_ip(&headers, peer.map(|ConnectInfo(a)| a)),
                user_agent = %user_agent(&headers),
                visit_count = %count,
                "visit logged"
            );
            let body = format!(
                "Hello Container World! 🚀\nI have been seen {} times.\nTime: {} UTC\n",
                count,
                now.format("%Y-%m-%d %H:%M:%S")
            );
            (StatusCode::OK, body).into_response()
        }
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "error in main route");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hello Container World! (Error: {e})\n"),
            )
                .into_response()
        }
    }
}

/// First `X-Forwarded-For` hop, else the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Unknown")
}
