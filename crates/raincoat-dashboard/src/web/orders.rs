use axum::{extract::State, Json};
use serde_json::{json, Value};

use raincoat_core::NewOrder;

use crate::app_state::AppState;
use crate::web::{blocking, ApiResult};

/// `POST /order`. Field values are stored as submitted, whatever their JSON type.
pub async fn create_order(
    State(app): State<AppState>,
    Json(req): Json<NewOrder>,
) -> ApiResult<Json<Value>> {
    app.metrics().observe_request("/order");

    let store = app.store().clone();
    let id = blocking(move || store.insert_order(req.customer, req.quantity, req.price)).await?;

    tracing::info!(id, "order recorded");
    Ok(Json(json!({ "success": true })))
}
