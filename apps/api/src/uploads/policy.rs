use std::path::Path;

use bytes::{Bytes, BytesMut};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;

const MIB: usize = 1024 * 1024;

/// Extra room for multipart boundaries and headers on top of the file ceiling.
pub const MULTIPART_OVERHEAD: usize = MIB;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Resume,
    Video,
}

impl UploadKind {
    /// Multipart field carrying the file.
    pub fn field_name(self) -> &'static str {
        match self {
            UploadKind::Resume => "resume",
            UploadKind::Video => "video",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            UploadKind::Resume => 10 * MIB,
            UploadKind::Video => 100 * MIB,
        }
    }

    /// Request body limit for the route accepting this kind.
    pub fn body_limit(self) -> usize {
        self.max_bytes() + MULTIPART_OVERHEAD
    }

    /// Checks the declared MIME type of the part.
    pub fn check_content_type(self, content_type: Option<&str>) -> Result<(), AppError> {
        let essence = mime_essence(content_type).unwrap_or_default();

        let accepted = match self {
            UploadKind::Resume => essence == "application/pdf",
            UploadKind::Video => essence.starts_with("video/") && essence.len() > "video/".len(),
        };

        if accepted {
            Ok(())
        } else {
            Err(AppError::UnsupportedMediaType(
                match self {
                    UploadKind::Resume => "Only PDF files are allowed",
                    UploadKind::Video => "Only video files are allowed",
                }
                .to_string(),
            ))
        }
    }

    fn too_large(self) -> AppError {
        AppError::PayloadTooLarge(
            match self {
                UploadKind::Resume => "File size must be less than 10MB",
                UploadKind::Video => "File size too large (max 100MB)",
            }
            .to_string(),
        )
    }

    /// Server-generated storage name: timestamp plus random suffix.
    pub fn generate_filename(self, client_name: Option<&str>, content_type: Option<&str>) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        match self {
            UploadKind::Resume => format!("resume_{millis}_{suffix}.pdf"),
            UploadKind::Video => {
                let ext = client_name
                    .and_then(safe_extension)
                    .unwrap_or_else(|| video_extension_for(content_type).to_string());
                format!("video-{millis}-{suffix}.{ext}")
            }
        }
    }
}

/// Extension of a client filename, if it is 1-8 ASCII alphanumerics.
fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if (1..=8).contains(&ext.len()) && ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}

/// Lower-cased `type/subtype` with any `; param=...` suffix dropped.
fn mime_essence(content_type: Option<&str>) -> Option<String> {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
}

fn video_extension_for(content_type: Option<&str>) -> &'static str {
    match mime_essence(content_type).as_deref() {
        Some("video/webm") => "webm",
        Some("video/quicktime") => "mov",
        Some("video/x-msvideo") => "avi",
        Some("video/x-matroska") => "mkv",
        Some("video/ogg") => "ogv",
        _ => "mp4",
    }
}

/// Accumulates upload chunks and fails as soon as the ceiling is crossed.
pub struct SizeGuard {
    kind: UploadKind,
    buffer: BytesMut,
}

impl SizeGuard {
    pub fn new(kind: UploadKind) -> Self {
        Self {
            kind,
            buffer: BytesMut::new(),
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Result<(), AppError> {
        if self.buffer.len() + chunk.len() > self.kind.max_bytes() {
            return Err(self.kind.too_large());
        }
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    pub fn finish(self) -> Result<Bytes, AppError> {
        if self.buffer.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        Ok(self.buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_accepts_only_pdf() {
        assert!(UploadKind::Resume
            .check_content_type(Some("application/pdf"))
            .is_ok());
        assert!(UploadKind::Resume
            .check_content_type(Some("Application/PDF; charset=binary"))
            .is_ok());
        assert!(matches!(
            UploadKind::Resume.check_content_type(Some("image/png")),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(UploadKind::Resume.check_content_type(None).is_err());
    }

    #[test]
    fn test_video_accepts_any_video_subtype() {
        assert!(UploadKind::Video.check_content_type(Some("video/mp4")).is_ok());
        assert!(UploadKind::Video
            .check_content_type(Some("video/quicktime"))
            .is_ok());
        assert!(UploadKind::Video.check_content_type(Some("video/")).is_err());
        assert!(UploadKind::Video
            .check_content_type(Some("application/pdf"))
            .is_err());
    }

    #[test]
    fn test_size_guard_rejects_over_ceiling() {
        let mut guard = SizeGuard::new(UploadKind::Resume);
        let chunk = vec![0u8; MIB];
        for _ in 0..10 {
            guard.push(&chunk).unwrap();
        }
        assert!(matches!(guard.push(&[0u8]), Err(AppError::PayloadTooLarge(_))));
    }

    #[test]
    fn test_size_guard_exact_ceiling_ok() {
        let mut guard = SizeGuard::new(UploadKind::Resume);
        guard.push(&vec![1u8; 10 * MIB]).unwrap();
        assert_eq!(guard.finish().unwrap().len(), 10 * MIB);
    }

    #[test]
    fn test_video_ceiling_is_100_mib() {
        let mut guard = SizeGuard::new(UploadKind::Video);
        let chunk = vec![0u8; MIB];
        for _ in 0..100 {
            guard.push(&chunk).unwrap();
        }
        assert!(matches!(guard.push(&[0u8]), Err(AppError::PayloadTooLarge(_))));
        assert_eq!(UploadKind::Video.body_limit(), 101 * MIB);
    }

    #[test]
    fn test_video_extension_ignores_mime_parameters() {
        let name = UploadKind::Video.generate_filename(None, Some("video/webm; codecs=vp9"));
        assert!(name.ends_with(".webm"));

        let quoted = UploadKind::Video
            .generate_filename(Some("noext"), Some("Video/QuickTime ; charset=binary"));
        assert!(quoted.ends_with(".mov"));
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(SizeGuard::new(UploadKind::Video).finish().is_err());
    }

    #[test]
    fn test_resume_filename_ignores_client_name() {
        let name = UploadKind::Resume.generate_filename(Some("../../etc/passwd"), None);
        assert!(name.starts_with("resume_"));
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_video_filename_extension() {
        let name = UploadKind::Video.generate_filename(Some("Demo Clip.MOV"), Some("video/quicktime"));
        assert!(name.starts_with("video-"));
        assert!(name.ends_with(".mov"));

        let fallback = UploadKind::Video.generate_filename(Some("clip.m p4"), Some("video/webm"));
        assert!(fallback.ends_with(".webm"));

        let unnamed = UploadKind::Video.generate_filename(None, Some("video/x-unknown"));
        assert!(unnamed.ends_with(".mp4"));
    }

    #[test]
    fn test_filenames_do_not_collide() {
        let a = UploadKind::Video.generate_filename(Some("a.mp4"), None);
        let b = UploadKind::Video.generate_filename(Some("a.mp4"), None);
        assert_ne!(a, b);
    }
}
