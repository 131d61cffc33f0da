use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;

/// `GET /transfer`. Always 200; the outcome is only the `success` flag.
pub async fn push_store(State(app): State<AppState>) -> Json<Value> {
    app.metrics().observe_request("/transfer");

    let pusher = app.pusher().clone();
    let local = app.store().path().to_path_buf();
    let success = tokio::task::spawn_blocking(move || pusher.push_store(&local))
        .await
        .unwrap_or(false);

    Json(json!({ "success": success }))
}
