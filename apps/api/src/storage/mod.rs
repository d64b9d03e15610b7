//! Storage: the only module that talks to the relational store.
//!
//! Handlers depend on `Arc<dyn PortfolioStore>` carried in `AppState`.
//! `PgStore` is the production backend; `MemoryStore` backs the tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::auth::password::{self, PasswordError};
use crate::models::{Contact, NewProject, Project, Resume};

pub mod memory;
pub mod postgres;
pub mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] PasswordError),
}

/// Admin account created on first start when no admin exists yet.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Creates missing tables and seeds the admin account if none exists.
    /// Idempotent; called once at startup before serving traffic.
    async fn initialize(&self, seed: &AdminSeed) -> Result<(), StoreError>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError>;

    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError>;

    /// Overwrites every mutable field in one statement. `None` when `id` does not exist.
    async fn update_project(
        &self,
        id: i64,
        project: NewProject,
    ) -> Result<Option<Project>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_project(&self, id: i64) -> Result<bool, StoreError>;

    async fn save_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Contact, StoreError>;

    /// All contact messages, newest first.
    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError>;

    /// Replaces any existing resume with this one atomically.
    async fn save_resume(&self, filename: &str, url: &str) -> Result<Resume, StoreError>;

    async fn current_resume(&self) -> Result<Option<Resume>, StoreError>;

    async fn admin_password_hash(&self, username: &str) -> Result<Option<String>, StoreError>;

    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn session_is_active(&self, token: &str, now: DateTime<Utc>) -> Result<bool, StoreError>;

    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;

    /// Returns the number of expired sessions removed.
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Checks a login against the stored Argon2 hash.
    /// Unknown usernames are `Ok(false)`, not an error.
    async fn verify_admin_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        match self.admin_password_hash(username).await? {
            Some(hash) => Ok(password::verify_password(password, &hash).await),
            None => Ok(false),
        }
    }
}
