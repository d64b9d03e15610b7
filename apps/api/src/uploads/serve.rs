use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use axum::{
    extract::{Path as UrlPath, State},
    http::header,
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Relative path with only normal segments. Parent, root and prefix components are refused.
pub fn sanitize_relative(requested: &str) -> Result<PathBuf, AppError> {
    if requested.contains('\0') {
        return Err(AppError::Forbidden);
    }

    let mut relative = PathBuf::new();
    for component in Path::new(requested).components() {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AppError::Forbidden)
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(AppError::NotFound("File not found".to_string()));
    }
    Ok(relative)
}

/// Resolves `requested` under `root`, following symlinks, and refuses anything that lands outside it.
pub async fn resolve_within(root: &Path, requested: &str) -> Result<PathBuf, AppError> {
    let relative = sanitize_relative(requested)?;

    let root = match tokio::fs::canonicalize(root).await {
        Ok(root) => root,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let target = match tokio::fs::canonicalize(root.join(relative)).await {
        Ok(target) => target,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    if !target.starts_with(&root) {
        return Err(AppError::Forbidden);
    }

    if !tokio::fs::metadata(&target).await?.is_file() {
        return Err(AppError::NotFound("File not found".to_string()));
    }
    Ok(target)
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// GET /uploads/*path
pub async fn handle_serve_upload(
    State(state): State<AppState>,
    UrlPath(requested): UrlPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = resolve_within(&state.config.uploads_dir, &requested).await?;
    let bytes = tokio::fs::read(&target).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&target)),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(matches!(
            sanitize_relative("../secret.txt"),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            sanitize_relative("videos/../../etc/passwd"),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            sanitize_relative("/etc/passwd"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_sanitize_keeps_nested_names() {
        assert_eq!(
            sanitize_relative("./videos/demo.mp4").unwrap(),
            PathBuf::from("videos/demo.mp4")
        );
        assert!(matches!(
            sanitize_relative(""),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_within_finds_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resume_1_abcd1234.pdf"), b"%PDF").unwrap();

        let resolved = resolve_within(dir.path(), "resume_1_abcd1234.pdf")
            .await
            .unwrap();
        assert!(resolved.ends_with("resume_1_abcd1234.pdf"));
    }

    #[tokio::test]
    async fn test_resolve_within_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_within(dir.path(), "nope.pdf").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("videos")).unwrap();
        assert!(matches!(
            resolve_within(dir.path(), "videos").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_forbidden() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), b"secret").unwrap();

        let root = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.txt"),
            root.path().join("link.txt"),
        )
        .unwrap();

        assert!(matches!(
            resolve_within(root.path(), "link.txt").await,
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("a.PDF")), "application/pdf");
        assert_eq!(content_type_for(Path::new("a.mov")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(
            content_type_for(Path::new("a.bin")),
            "application/octet-stream"
        );
    }
}
