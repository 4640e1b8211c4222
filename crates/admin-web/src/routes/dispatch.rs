//! Message dispatch endpoints.

use axum::extract::{Path, State};
use axum::Json;
use outreach::StudentRecord;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub sent: usize,
}

#[derive(Debug, Serialize)]
pub struct DefaultMessageResponse {
    pub message: String,
}

/// POST /api/teachers/:teacher/dispatch
pub async fn dispatch_api(
    State(state): State<AppState>,
    Path(teacher): Path<String>,
    Json(req): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>> {
    let sent = state
        .pipeline
        .dispatch(&teacher, &req.message, req.students)
        .await?;

    Ok(Json(DispatchResponse {
        success: true,
        sent,
    }))
}

/// GET /api/teachers/:teacher/default-message
pub async fn default_message_api(
    State(state): State<AppState>,
    Path(teacher): Path<String>,
) -> Result<Json<DefaultMessageResponse>> {
    let message = state.pipeline.default_message(&teacher).await?;
    Ok(Json(DefaultMessageResponse { message }))
}
