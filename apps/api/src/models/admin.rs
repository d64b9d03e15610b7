use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Stored admin login. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
