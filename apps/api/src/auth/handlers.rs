use axum::{extract::State, Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::auth::session::{
    check_session, cleared_session_cookie, login, logout, session_cookie, SESSION_COOKIE,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth
pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let token = login(
        state.store.as_ref(),
        request.username.trim(),
        &request.password,
    )
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    let jar = jar.add(session_cookie(token, state.config.is_production()));
    Ok((jar, Json(json!({ "success": true }))))
}

/// DELETE /api/auth
///
/// Always clears the cookie, even if revoking the stored session fails.
pub async fn handle_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = logout(state.store.as_ref(), cookie.value()).await {
            warn!("Failed to revoke admin session: {e}");
        }
    }
    (
        jar.remove(cleared_session_cookie()),
        Json(json!({ "success": true })),
    )
}

/// GET /api/auth/check
pub async fn handle_check(State(state): State<AppState>, jar: CookieJar) -> Json<Value> {
    let authenticated = match check_session(state.store.as_ref(), &jar).await {
        Ok(authenticated) => authenticated,
        Err(e) => {
            warn!("Session check failed: {e}");
            false
        }
    };
    Json(json!({ "authenticated": authenticated }))
}
