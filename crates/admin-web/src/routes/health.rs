//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness check; does not touch the backend or the database.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: outreach::version(),
    })
}
