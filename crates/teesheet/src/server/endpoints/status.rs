//! Health check endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// GET /health
///
/// Returns 200 once the server is accepting requests.
pub async fn get_health() -> Response {
    (StatusCode::OK, "OK").into_response()
}
