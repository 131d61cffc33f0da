//! Axum router wiring.

use axum::{routing::{get, post}, Router};

use crate::{app_state::AppState, ops, web};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(web::dashboard::dashboard))
        .route("/order", post(web::orders::create_order))
        .route("/transfer", get(web::transfer::push_store))
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .route("/static/js/app.js", get(web::app_js))
        .with_state(state)
}
