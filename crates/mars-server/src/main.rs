//! MARS server
//!
//! Visit counter over Redis, plus health/readiness/metrics endpoints for
//! container orchestration checks.

use std::net::SocketAddr;
use std::process::ExitCode;

use mars_server::{
    app_state::AppState,
    config::{self, ConfigResolver},
    counter::VisitCounter,
    obs::logging,
    router,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Log level and directory are env-only, so logging is up before the config file is read.
    let env = ConfigResolver::from_process_env();
    let _log_guard = logging::init(env.log_level(), &env.log_dir());

    let cfg = match config::load_effective() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(path = %cfg.config_path, "configuration loaded");

    let counter = VisitCounter::connect(&cfg.store_url()).await;
    let state = AppState::new(cfg, counter);
    let listen = state.cfg().listen_addr();

    tracing::info!(%listen, debug = state.cfg().debug, "starting MARS application");
    let listener = match tokio::net::TcpListener::bind(&listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let app = router::build_router(state);
    let served = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
