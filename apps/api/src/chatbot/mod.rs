//! Chatbot: answers visitor questions about the portfolio owner.
//!
//! With a completion backend configured, each request rebuilds the persona
//! prompt from the current projects and forwards the conversation. Without
//! one, or when the call fails or times out, the keyword fallback answers.
//! Callers never see an upstream error from this module.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::{ChatMessage, LlmError, Role};
use crate::models::Project;
use crate::storage::PortfolioStore;

pub mod fallback;
pub mod handlers;
pub mod prompts;

/// Most recent history entries forwarded to the completion API.
pub const HISTORY_LIMIT: usize = 10;

/// A chat-completion backend. `LlmClient` is the production implementation.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub using_fallback: bool,
}

#[derive(Clone)]
pub struct Chatbot {
    completion: Option<Arc<dyn ChatCompletion>>,
    timeout: Duration,
}

impl Chatbot {
    pub fn new(completion: Option<Arc<dyn ChatCompletion>>, timeout: Duration) -> Self {
        Self {
            completion,
            timeout,
        }
    }

    /// A chatbot that always answers from the keyword fallback.
    pub fn fallback_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn is_fallback_only(&self) -> bool {
        self.completion.is_none()
    }

    pub async fn respond(
        &self,
        store: &dyn PortfolioStore,
        message: &str,
        history: &[ChatMessage],
    ) -> ChatReply {
        let Some(completion) = &self.completion else {
            return fallback_reply(store, message).await;
        };

        let system = build_context(store).await;
        let messages = assemble_messages(system, history, message);

        match tokio::time::timeout(self.timeout, completion.complete(&messages)).await {
            Ok(Ok(text)) => ChatReply {
                response: text,
                using_fallback: false,
            },
            Ok(Err(e)) => {
                warn!("Completion API failed, answering from fallback: {e}");
                fallback_reply(store, message).await
            }
            Err(_) => {
                warn!("{}", LlmError::Timeout(self.timeout));
                fallback_reply(store, message).await
            }
        }
    }
}

/// Persona prompt with the current project list rendered as bullets.
pub async fn build_context(store: &dyn PortfolioStore) -> String {
    match store.list_projects().await {
        Ok(projects) => render_persona(&projects),
        Err(e) => {
            warn!("Could not load projects for chatbot context: {e}");
            prompts::PERSONA_MINIMAL.to_string()
        }
    }
}

pub fn render_persona(projects: &[Project]) -> String {
    let projects_context = if projects.is_empty() {
        prompts::NO_PROJECTS_CONTEXT.to_string()
    } else {
        projects
            .iter()
            .map(|p| {
                format!(
                    "- {}: {} (Technologies: {})",
                    p.name,
                    p.description,
                    p.technologies.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    prompts::PERSONA_SYSTEM
        .replace("{skills}", prompts::SKILLS_SUMMARY)
        .replace("{projects}", &projects_context)
}

/// System prompt, then at most `HISTORY_LIMIT` recent user/assistant turns, then the new message.
/// Client-supplied system turns are dropped.
pub fn assemble_messages(
    system: String,
    history: &[ChatMessage],
    message: &str,
) -> Vec<ChatMessage> {
    let turns: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != Role::System)
        .collect();
    let recent = &turns[turns.len().saturating_sub(HISTORY_LIMIT)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(recent.iter().map(|m| (*m).clone()));
    messages.push(ChatMessage::user(message));
    messages
}

async fn fallback_reply(store: &dyn PortfolioStore, message: &str) -> ChatReply {
    let topic = fallback::match_topic(message);

    let projects = if fallback::needs_projects(topic) {
        match store.list_projects().await {
            Ok(projects) => Some(projects),
            Err(e) => {
                warn!("Could not load projects for fallback answer: {e}");
                None
            }
        }
    } else {
        None
    };

    info!("Chatbot fallback answered topic {topic:?}");
    ChatReply {
        response: fallback::answer(topic, projects.as_deref()),
        using_fallback: true,
    }
}
