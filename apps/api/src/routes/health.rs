use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Returns service version plus database and completion-backend status.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Health check database ping failed: {e}");
            "failed"
        }
    };

    let completion_api = if state.chatbot.is_fallback_only() {
        "fallback"
    } else {
        "configured"
    };

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "completion_api": completion_api
    }))
}
