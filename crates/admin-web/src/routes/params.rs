//! Teacher parameter management.

use axum::extract::{Path, State};
use axum::Json;
use class_gateway::ParamMap;
use database::ParamScope;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TeachersResponse {
    pub teachers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PutParamsResponse {
    pub success: bool,
    pub scope: ParamScope,
    pub stored: usize,
}

/// GET /api/teachers
pub async fn teachers_api(State(state): State<AppState>) -> Result<Json<TeachersResponse>> {
    let teachers = database::params::list_teachers(state.db.pool()).await?;
    Ok(Json(TeachersResponse { teachers }))
}

/// PUT /api/teachers/:teacher/params/:scope
///
/// Replaces the whole parameter table for one scope.
pub async fn put_params_api(
    State(state): State<AppState>,
    Path((teacher, scope)): Path<(String, String)>,
    Json(table): Json<ParamMap>,
) -> Result<Json<PutParamsResponse>> {
    let scope: ParamScope = scope.parse()?;
    state.pipeline.put_params(&teacher, scope, &table).await?;

    Ok(Json(PutParamsResponse {
        success: true,
        scope,
        stored: table.len(),
    }))
}
