//! Route handlers for the admin web interface.

pub mod candidates;
pub mod dispatch;
pub mod health;
pub mod params;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/teachers", get(params::teachers_api))
        .route(
            "/api/teachers/:teacher/candidates",
            post(candidates::candidates_api),
        )
        .route("/api/teachers/:teacher/dispatch", post(dispatch::dispatch_api))
        .route(
            "/api/teachers/:teacher/default-message",
            get(dispatch::default_message_api),
        )
        .route("/api/teachers/:teacher/params/:scope", put(params::put_params_api))
}
