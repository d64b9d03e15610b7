use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The currently published resume file. At most one row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: i64,
    pub filename: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}
