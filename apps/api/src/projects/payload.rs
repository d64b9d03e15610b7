use serde::Deserialize;

use crate::errors::AppError;
use crate::models::NewProject;

/// Technologies and tags arrive either as a JSON array or as the raw
/// comma-separated text of an admin form field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Csv(String),
}

impl StringList {
    /// Trimmed, non-empty items in submission order.
    pub fn normalize(self) -> Vec<String> {
        match self {
            StringList::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            StringList::Csv(raw) => split_list(&raw),
        }
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Create/update body. Every field is optional at the serde layer so that
/// missing fields produce one validation error listing all of them.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<StringList>,
    pub github: Option<String>,
    pub video: Option<String>,
    pub tags: Option<StringList>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProjectPayload {
    pub fn validate(self) -> Result<NewProject, AppError> {
        let name = non_blank(self.name);
        let description = non_blank(self.description);
        let technologies = self
            .technologies
            .map(StringList::normalize)
            .unwrap_or_default();
        let github = non_blank(self.github);

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if description.is_none() {
            missing.push("description");
        }
        if technologies.is_empty() {
            missing.push("technologies");
        }
        if github.is_none() {
            missing.push("github");
        }

        match (name, description, github) {
            (Some(name), Some(description), Some(github)) if missing.is_empty() => {
                Ok(NewProject {
                    name,
                    description,
                    technologies,
                    github,
                    video: non_blank(self.video),
                    tags: self.tags.map(StringList::normalize).unwrap_or_default(),
                })
            }
            _ => Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Project ids are positive integers; anything else is a client error.
pub fn parse_project_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::Validation("Invalid project ID".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> ProjectPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_csv_fields_are_split_and_trimmed() {
        let project = payload(json!({
            "name": " Folio ",
            "description": "Portfolio",
            "technologies": "Rust,  Axum , ,Postgres",
            "github": "https://github.com/example/folio",
            "tags": "web, api"
        }))
        .validate()
        .unwrap();

        assert_eq!(project.name, "Folio");
        assert_eq!(project.technologies, vec!["Rust", "Axum", "Postgres"]);
        assert_eq!(project.tags, vec!["web", "api"]);
        assert_eq!(project.video, None);
    }

    #[test]
    fn test_array_fields_keep_order() {
        let project = payload(json!({
            "name": "Folio",
            "description": "Portfolio",
            "technologies": ["TypeScript", "React", "MySQL"],
            "github": "https://github.com/example/folio",
            "video": "/uploads/video-1.mp4",
            "tags": []
        }))
        .validate()
        .unwrap();

        assert_eq!(project.technologies, vec!["TypeScript", "React", "MySQL"]);
        assert!(project.tags.is_empty());
        assert_eq!(project.video.as_deref(), Some("/uploads/video-1.mp4"));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = payload(json!({ "name": "Folio", "technologies": " , " }))
            .validate()
            .unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Missing required fields: description, technologies, github")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_video_becomes_none() {
        let project = payload(json!({
            "name": "Folio",
            "description": "Portfolio",
            "technologies": "Rust",
            "github": "https://github.com/example/folio",
            "video": "   "
        }))
        .validate()
        .unwrap();
        assert_eq!(project.video, None);
    }

    #[test]
    fn test_parse_project_id() {
        assert_eq!(parse_project_id("12").unwrap(), 12);
        assert!(parse_project_id("abc").is_err());
        assert!(parse_project_id("0").is_err());
        assert!(parse_project_id("-3").is_err());
        assert!(parse_project_id("1.5").is_err());
    }
}
