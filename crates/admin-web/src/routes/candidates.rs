//! Candidate discovery endpoint.

use axum::extract::{Path, State};
use axum::Json;
use outreach::{DiscoveryReport, StudentRecord, TargetClass};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// Grade and date selection posted by the UI.
///
/// `time` entries may be weekend tokens, compact dates or JSON arrays of
/// either.
#[derive(Debug, Deserialize)]
pub struct CandidatesRequest {
    #[serde(default)]
    pub grade: Vec<String>,
    #[serde(default)]
    pub time: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub success: bool,
    pub students: Vec<StudentRecord>,
    pub classes: Vec<TargetClass>,
    pub debug_info: DiscoveryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/teachers/:teacher/candidates
pub async fn candidates_api(
    State(state): State<AppState>,
    Path(teacher): Path<String>,
    Json(req): Json<CandidatesRequest>,
) -> Result<Json<CandidatesResponse>> {
    let found = state
        .pipeline
        .discover_candidates(&teacher, &req.grade, &req.time)
        .await?;

    tracing::info!(
        teacher = %teacher,
        classes = found.classes.len(),
        students = found.students.len(),
        "Candidates discovered"
    );

    Ok(Json(CandidatesResponse {
        success: true,
        students: found.students,
        classes: found.classes,
        debug_info: found.report,
        message: found.message,
    }))
}
