//! Keyword fallback: deterministic answers when the completion API is
//! unconfigured or failing.
//!
//! Rules are evaluated in order and the first match wins, so narrower
//! rules must come before broader ones.

use crate::chatbot::prompts::{
    skills_answer, CONTACT_ANSWER, GOALS_ANSWER, IDENTITY_ANSWER, PROJECTS_ANSWER,
    PROJECTS_EMPTY_ANSWER, RESUME_ANSWER, UNKNOWN_ANSWER,
};
use crate::models::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Identity,
    Skills,
    Projects,
    Experience,
    Contact,
    Goals,
}

pub struct FallbackRule {
    pub topic: Topic,
    matches: fn(&str) -> bool,
}

impl FallbackRule {
    /// `message` must already be lower-cased.
    pub fn matches(&self, message: &str) -> bool {
        (self.matches)(message)
    }
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| message.contains(n))
}

pub const RULES: &[FallbackRule] = &[
    FallbackRule {
        topic: Topic::Identity,
        matches: |m| m.contains("who") && m.contains("fatin"),
    },
    FallbackRule {
        topic: Topic::Skills,
        matches: |m| contains_any(m, &["skill", "technology"]),
    },
    FallbackRule {
        topic: Topic::Projects,
        matches: |m| m.contains("project"),
    },
    FallbackRule {
        topic: Topic::Experience,
        matches: |m| contains_any(m, &["resume", "résumé", "experience"]),
    },
    FallbackRule {
        topic: Topic::Contact,
        matches: |m| contains_any(m, &["contact", "email"]),
    },
    FallbackRule {
        topic: Topic::Goals,
        matches: |m| contains_any(m, &["goal", "future"]),
    },
];

/// Returns the topic of the first rule matching `message`, if any.
pub fn match_topic(message: &str) -> Option<Topic> {
    let lower = message.to_lowercase();
    RULES.iter().find(|r| r.matches(&lower)).map(|r| r.topic)
}

/// Whether answering `topic` needs the project list.
pub fn needs_projects(topic: Option<Topic>) -> bool {
    topic == Some(Topic::Projects)
}

/// Renders the canned answer. `projects` is only consulted for `Topic::Projects`;
/// `None` there means the list could not be loaded.
pub fn answer(topic: Option<Topic>, projects: Option<&[Project]>) -> String {
    match topic {
        Some(Topic::Identity) => IDENTITY_ANSWER.to_string(),
        Some(Topic::Skills) => skills_answer(),
        Some(Topic::Projects) => match projects {
            Some(projects) if !projects.is_empty() => {
                let names = projects
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                PROJECTS_ANSWER.replace("{names}", &names)
            }
            _ => PROJECTS_EMPTY_ANSWER.to_string(),
        },
        Some(Topic::Experience) => RESUME_ANSWER.to_string(),
        Some(Topic::Contact) => CONTACT_ANSWER.to_string(),
        Some(Topic::Goals) => GOALS_ANSWER.to_string(),
        None => UNKNOWN_ANSWER.to_string(),
    }
}
