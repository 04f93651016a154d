use crate::utils::error::AnalyticsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Boundary wrapper turning engine/storage failures into the wire contract:
/// `{"error": <message>}` with 404 for missing documents and 500 for
/// everything else. One contract for every endpoint.
#[derive(Debug)]
pub struct ApiError(pub AnalyticsError);

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AnalyticsError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
