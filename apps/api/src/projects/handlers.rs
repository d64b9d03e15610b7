use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::models::Project;
use crate::projects::payload::{parse_project_id, ProjectPayload};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectMutationResponse {
    pub success: bool,
    pub project: Project,
}

/// GET /api/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.list_projects().await?))
}

/// POST /api/projects
pub async fn handle_create_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ProjectPayload>, AppError>,
) -> Result<(StatusCode, Json<ProjectMutationResponse>), AppError> {
    let project = payload.validate()?;
    let project = state.store.create_project(project).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectMutationResponse {
            success: true,
            project,
        }),
    ))
}

/// GET /api/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let id = parse_project_id(&raw_id)?;
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// PUT /api/projects/:id
///
/// Single conditional update; a missing row is reported as 404 without a prior read.
pub async fn handle_update_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<ProjectPayload>, AppError>,
) -> Result<Json<ProjectMutationResponse>, AppError> {
    let id = parse_project_id(&raw_id)?;
    let project = payload.validate()?;
    let project = state
        .store
        .update_project(id, project)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(ProjectMutationResponse {
        success: true,
        project,
    }))
}

/// DELETE /api/projects/:id
pub async fn handle_delete_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_project_id(&raw_id)?;
    if !state.store.delete_project(id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    Ok(Json(json!({ "success": true })))
}
