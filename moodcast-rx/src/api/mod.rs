//! HTTP API handlers for moodcast-rx

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::{SuggestError, WeatherError};

pub mod context;
pub mod health;
pub mod recommend;

pub use context::context;
pub use health::health_routes;
pub use recommend::recommend;

/// Error rendered to HTTP clients as a JSON `{"error": ...}` body.
///
/// All upstream failures that abort a request map here; degradations that
/// keep the request alive (unparseable model output, catalog misses) never
/// reach this type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(e: WeatherError) -> Self {
        ApiError::upstream(e.to_string())
    }
}

impl From<SuggestError> for ApiError {
    fn from(e: SuggestError) -> Self {
        ApiError::upstream(e.to_string())
    }
}
