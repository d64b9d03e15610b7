use std::path::Path;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info};

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::policy::{SizeGuard, UploadKind};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A checked upload, held in memory until it is written.
#[derive(Debug)]
pub struct AcceptedUpload {
    pub filename: String,
    pub bytes: Bytes,
}

/// POST /api/upload/resume
pub async fn handle_upload_resume(
    _admin: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = accept_upload(multipart, UploadKind::Resume).await?;
    let url = write_upload(&state.config.uploads_dir, &upload).await?;

    if let Err(e) = state.store.save_resume(&upload.filename, &url).await {
        error!("Resume {} stored on disk but not recorded: {e}", upload.filename);
    }

    Ok(Json(UploadResponse {
        success: true,
        filename: upload.filename,
        url,
        message: Some("Resume uploaded successfully".to_string()),
    }))
}

/// POST /api/upload
pub async fn handle_upload_video(
    _admin: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = accept_upload(multipart, UploadKind::Video).await?;
    let url = write_upload(&state.config.uploads_dir, &upload).await?;

    Ok(Json(UploadResponse {
        success: true,
        filename: upload.filename,
        url,
        message: None,
    }))
}

/// Finds the file field for `kind`, checks its type, then reads it under the size ceiling.
/// Nothing touches the filesystem here.
pub async fn accept_upload(
    mut multipart: Multipart,
    kind: UploadKind,
) -> Result<AcceptedUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(kind.field_name()) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        kind.check_content_type(content_type.as_deref())?;

        let filename = kind.generate_filename(field.file_name(), content_type.as_deref());
        let bytes = read_limited(field, kind).await?;
        return Ok(AcceptedUpload { filename, bytes });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

async fn read_limited(mut field: Field<'_>, kind: UploadKind) -> Result<Bytes, AppError> {
    let mut guard = SizeGuard::new(kind);
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        guard.push(&chunk)?;
    }
    guard.finish()
}

async fn write_upload(root: &Path, upload: &AcceptedUpload) -> Result<String, AppError> {
    tokio::fs::create_dir_all(root).await?;
    tokio::fs::write(root.join(&upload.filename), &upload.bytes).await?;
    info!(
        "Stored upload {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );
    Ok(format!("/uploads/{}", upload.filename))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the allowed size".to_string())
    } else {
        AppError::Validation(e.body_text())
    }
}
