//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::app_state::AppState;
use crate::obs::EXPOSITION_CONTENT_TYPE;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    state.metrics().observe_request("/metrics");
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
