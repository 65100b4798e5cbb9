use axum::response::{IntoResponse, Json};

/// `GET /health`: liveness probe.  Does not touch upstream.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
