//! Raincoat dashboard server.
//!
//! - `GET /` dashboard page, `POST /order`, `GET /transfer`
//! - `GET /metrics` Prometheus exposition, `GET /healthz`
//! - Config: first CLI argument, else `raincoat.yaml`

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use raincoat_core::error::{Result, RaincoatError};
use raincoat_dashboard::{app_state, config, router};

const DEFAULT_CONFIG: &str = "raincoat.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "raincoat-dashboard stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "raincoat-dashboard starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| RaincoatError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RaincoatError::Internal(format!("server failed: {e}")))
}
