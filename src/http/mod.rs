pub mod crud;
pub mod error;
pub mod metrics;

use crate::core::MetricsEngine;
use crate::domain::ports::DocumentStore;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub engine: Arc<MetricsEngine>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, engine: MetricsEngine) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
        }
    }
}

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type"),
    );
}

/// Permissive CORS: every response gets the allow-all headers, preflights are
/// answered directly with 204.
async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors(response.headers_mut());
        return response;
    }
    let mut response = next.run(request).await;
    apply_cors(response.headers_mut());
    response
}

async fn healthz_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/api/metrics/rfm", get(metrics::rfm_handler))
        .route("/api/metrics/clv", get(metrics::clv_handler))
        .route("/api/metrics/nps", get(metrics::nps_handler))
        .route(
            "/api/:collection",
            get(crud::list_documents).post(crud::create_document),
        )
        .route(
            "/api/:collection/:id",
            put(crud::update_document).delete(crud::delete_document),
        )
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}
