// HTTP polish for handler errors.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use raincoat_core::RaincoatError;

/// Handler-side wrapper so `RaincoatError` can become an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub RaincoatError);

impl From<RaincoatError> for ApiError {
    fn from(e: RaincoatError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RaincoatError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RaincoatError::Store(_)
            | RaincoatError::Transfer(_)
            | RaincoatError::UnsupportedVersion
            | RaincoatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self.0, "request failed");
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
