use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
    pub using_fallback: bool,
}

/// POST /api/chatbot
pub async fn handle_chat(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ChatRequest>, AppError>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let reply = state
        .chatbot
        .respond(state.store.as_ref(), message, &request.conversation_history)
        .await;

    Ok(Json(ChatResponse {
        response: reply.response,
        timestamp: Utc::now().to_rfc3339(),
        using_fallback: reply.using_fallback,
    }))
}
