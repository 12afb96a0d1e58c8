use axum::{http::StatusCode, response::IntoResponse};

/// Liveness check: returns 200 "ok" as long as the server is running.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
