//! Session guard for the admin area.
//!
//! The `admin_session` cookie carries a random opaque token; the token is
//! only honored while a matching, unexpired row exists in the session store.
//! Logging out deletes that row, so a copied cookie stops working.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{PortfolioStore, StoreError};

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_TTL_HOURS: i64 = 24;

/// 32 lowercase hex chars from a v4 UUID.
pub fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn is_well_formed(token: &str) -> bool {
    token.len() == 32 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::hours(SESSION_TTL_HOURS))
        .build()
}

/// Cookie handed to `CookieJar::remove`; path must match the one used at login.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .build()
}

/// Verifies credentials and opens a new session. Returns the token on success,
/// `None` on a bad username or password (the two are not distinguished).
pub async fn login(
    store: &dyn PortfolioStore,
    username: &str,
    password: &str,
) -> Result<Option<String>, StoreError> {
    if !store.verify_admin_credential(username, password).await? {
        warn!("Failed admin login attempt");
        return Ok(None);
    }

    let now = Utc::now();
    let purged = store.purge_expired_sessions(now).await?;
    if purged > 0 {
        info!("Purged {purged} expired admin sessions");
    }

    let token = new_session_token();
    store
        .create_session(&token, username, now + Duration::hours(SESSION_TTL_HOURS))
        .await?;
    info!("Admin '{username}' logged in");
    Ok(Some(token))
}

/// Revokes the session named by `token`. Unknown tokens are not an error.
pub async fn logout(store: &dyn PortfolioStore, token: &str) -> Result<(), StoreError> {
    store.delete_session(token).await
}

/// Whether the request's cookie names a live session.
pub async fn check_session(store: &dyn PortfolioStore, jar: &CookieJar) -> Result<bool, StoreError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(false);
    };
    let token = cookie.value();
    if !is_well_formed(token) {
        return Ok(false);
    }
    store.session_is_active(token, Utc::now()).await
}

/// Extractor gating admin-only handlers. Rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if check_session(state.store.as_ref(), &jar).await? {
            Ok(AdminSession)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
