use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project as served to clients.
/// `technologies` and `tags` are always sequences, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github: String,
    pub video: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The mutable fields of a project, already validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github: String,
    pub video: Option<String>,
    pub tags: Vec<String>,
}

impl NewProject {
    pub fn into_project(self, id: i64, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            technologies: self.technologies,
            github: self.github,
            video: self.video,
            tags: self.tags,
            created_at,
        }
    }
}
