use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::auth::password::hash_password;
use crate::models::{AdminCredential, Contact, NewProject, Project, Resume};
use crate::storage::{AdminSeed, PortfolioStore, StoreError};

#[derive(Default)]
struct Tables {
    projects: Vec<Project>,
    contacts: Vec<Contact>,
    resume: Option<Resume>,
    admins: Vec<AdminCredential>,
    /// Session token → expiry.
    sessions: HashMap<String, DateTime<Utc>>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store with the same semantics as `PgStore`.
/// One lock guards all tables, so every operation is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an admin directly, bypassing the empty-table check of `initialize`.
    pub async fn insert_admin(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let password_hash = hash_password(password).await?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        tables.admins.retain(|a| a.username != username);
        tables.admins.push(AdminCredential {
            id,
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        });
        Ok(())
    }

    pub async fn resume_count(&self) -> usize {
        usize::from(self.tables.read().await.resume.is_some())
    }

    pub async fn contact_count(&self) -> usize {
        self.tables.read().await.contacts.len()
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn initialize(&self, seed: &AdminSeed) -> Result<(), StoreError> {
        if !self.tables.read().await.admins.is_empty() {
            return Ok(());
        }
        // Hash outside the write lock; re-check emptiness before inserting.
        let password_hash = hash_password(&seed.password).await?;
        let mut tables = self.tables.write().await;
        if tables.admins.is_empty() {
            let id = tables.next_id();
            tables.admins.push(AdminCredential {
                id,
                username: seed.username.clone(),
                password_hash,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let tables = self.tables.read().await;
        let mut projects = tables.projects.clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(projects)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let project = project.into_project(id, Utc::now());
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn update_project(
        &self,
        id: i64,
        project: NewProject,
    ) -> Result<Option<Project>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        *slot = project.into_project(id, slot.created_at);
        Ok(Some(slot.clone()))
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        Ok(tables.projects.len() < before)
    }

    async fn save_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Contact, StoreError> {
        let mut tables = self.tables.write().await;
        let contact = Contact {
            id: tables.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        };
        tables.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        let tables = self.tables.read().await;
        let mut contacts = tables.contacts.clone();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(contacts)
    }

    async fn save_resume(&self, filename: &str, url: &str) -> Result<Resume, StoreError> {
        let mut tables = self.tables.write().await;
        let resume = Resume {
            id: tables.next_id(),
            filename: filename.to_string(),
            url: url.to_string(),
            uploaded_at: Utc::now(),
        };
        tables.resume = Some(resume.clone());
        Ok(resume)
    }

    async fn current_resume(&self) -> Result<Option<Resume>, StoreError> {
        Ok(self.tables.read().await.resume.clone())
    }

    async fn admin_password_hash(&self, username: &str) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .iter()
            .find(|a| a.username == username)
            .map(|a| a.password_hash.clone()))
    }

    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.admins.iter().any(|a| a.username == username) {
            // Mirrors the foreign key on admin_sessions.username.
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        tables.sessions.insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn session_is_active(&self, token: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .get(token)
            .is_some_and(|expires_at| *expires_at > now))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.tables.write().await.sessions.remove(token);
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, expires_at| *expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn sample(name: &str, technologies: &[&str], tags: &[&str]) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: format!("{name} description"),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
            github: format!("https://github.com/example/{name}"),
            video: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn seed() -> AdminSeed {
        AdminSeed {
            username: "admin".to_string(),
            password: "s3cret!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_created_project_lists_with_sequences_intact() {
        let store = MemoryStore::new();
        store
            .create_project(sample("folio", &["Rust", "Axum", "Postgres"], &["web", "api"]))
            .await
            .unwrap();

        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].technologies, vec!["Rust", "Axum", "Postgres"]);
        assert_eq!(projects[0].tags, vec!["web", "api"]);
    }

    #[tokio::test]
    async fn test_projects_listed_newest_first() {
        let store = MemoryStore::new();
        store.create_project(sample("first", &["C"], &[])).await.unwrap();
        store.create_project(sample("second", &["C"], &[])).await.unwrap();

        let names: Vec<_> = store
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_update_missing_project_returns_none() {
        let store = MemoryStore::new();
        let updated = store
            .update_project(42, sample("ghost", &["Go"], &[]))
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_creation_time() {
        let store = MemoryStore::new();
        let created = store.create_project(sample("old", &["C"], &[])).await.unwrap();
        let updated = store
            .update_project(created.id, sample("new", &["Rust"], &["cli"]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "new");
        assert_eq!(updated.tags, vec!["cli"]);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = MemoryStore::new();
        let created = store.create_project(sample("gone", &["C"], &[])).await.unwrap();
        assert!(store.delete_project(created.id).await.unwrap());
        assert!(!store.delete_project(created.id).await.unwrap());
        assert!(store.get_project(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_resume_replaces_previous() {
        let store = MemoryStore::new();
        store.save_resume("a.pdf", "/uploads/a.pdf").await.unwrap();
        store.save_resume("b.pdf", "/uploads/b.pdf").await.unwrap();

        assert_eq!(store.resume_count().await, 1);
        let current = store.current_resume().await.unwrap().unwrap();
        assert_eq!(current.filename, "b.pdf");
        assert_eq!(current.url, "/uploads/b.pdf");
    }

    #[tokio::test]
    async fn test_current_resume_empty() {
        assert!(MemoryStore::new().current_resume().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_contacts_newest_first() {
        let store = MemoryStore::new();
        store.save_contact("A", "a@x.io", "hi").await.unwrap();
        store.save_contact("B", "b@x.io", "hello").await.unwrap();
        let contacts = store.list_contacts().await.unwrap();
        assert_eq!(contacts[0].name, "B");
        assert_eq!(contacts[1].name, "A");
    }

    #[tokio::test]
    async fn test_verify_admin_credential() {
        let store = MemoryStore::new();
        store.initialize(&seed()).await.unwrap();

        assert!(store.verify_admin_credential("admin", "s3cret!").await.unwrap());
        assert!(!store.verify_admin_credential("admin", "wrong").await.unwrap());
        assert!(!store.verify_admin_credential("nobody", "s3cret!").await.unwrap());
    }

    #[tokio::test]
    async fn test_initialize_seeds_only_once() {
        let store = MemoryStore::new();
        store.initialize(&seed()).await.unwrap();
        store
            .initialize(&AdminSeed {
                username: "other".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        assert!(store.admin_password_hash("admin").await.unwrap().is_some());
        assert!(store.admin_password_hash("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_expire_and_purge() {
        let store = MemoryStore::new();
        store.initialize(&seed()).await.unwrap();
        let now = Utc::now();
        store
            .create_session("live", "admin", now + Duration::hours(1))
            .await
            .unwrap();
        store
            .create_session("stale", "admin", now - Duration::seconds(1))
            .await
            .unwrap();

        assert!(store.session_is_active("live", now).await.unwrap());
        assert!(!store.session_is_active("stale", now).await.unwrap());
        assert!(!store.session_is_active("unknown", now).await.unwrap());

        assert_eq!(store.purge_expired_sessions(now).await.unwrap(), 1);
        store.delete_session("live").await.unwrap();
        assert!(!store.session_is_active("live", now).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_requires_known_admin() {
        let store = MemoryStore::new();
        let expires = Utc::now() + Duration::hours(1);
        assert!(store.create_session("t", "nobody", expires).await.is_err());
    }
}
