use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::server::endpoints::{status, tee_times};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(status::get_health))
        .route(
            "/tee_times",
            get(tee_times::get_tee_times).post(tee_times::post_tee_times),
        )
        .with_state(app_state)
}
