use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CurrentResumeResponse {
    pub resume: Option<Resume>,
    pub timestamp: String,
}

/// GET /api/resume
///
/// Public. `resume` is null until one has been uploaded.
pub async fn handle_current_resume(
    State(state): State<AppState>,
) -> Result<Json<CurrentResumeResponse>, AppError> {
    let resume = state.store.current_resume().await?;
    Ok(Json(CurrentResumeResponse {
        resume,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
