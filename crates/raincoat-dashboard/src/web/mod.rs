//! Page and JSON handlers.
//!
//! - `GET /`          : dashboard HTML (also drives the simulated metrics)
//! - `POST /order`    : append an order
//! - `GET /transfer`  : push the store file over SFTP
//! - `GET /static/js/app.js` : front-end script

pub mod dashboard;
pub mod error;
pub mod orders;
pub mod transfer;

use axum::{http::header, response::IntoResponse};

use raincoat_core::error::{Result, RaincoatError};

pub use error::{ApiError, ApiResult};

const APP_JS: &str = include_str!("assets/app.js");

/// Run blocking store / network work off the async workers and wait for it.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RaincoatError::Internal(format!("blocking task failed: {e}")))?
}

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript; charset=utf-8")], APP_JS)
}
