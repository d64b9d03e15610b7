use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::auth::password::hash_password;
use crate::models::{Contact, NewProject, Project, Resume};
use crate::storage::{schema, AdminSeed, PortfolioStore, StoreError};

/// Arbitrary key for the advisory lock that serializes schema bootstrap
/// across processes starting at the same time.
const SCHEMA_LOCK_KEY: i64 = 0x466f_6c69_6f00;

/// Raw `projects` row. JSONB columns decode straight into string lists;
/// a NULL left behind by older rows becomes an empty list.
#[derive(Debug, FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    description: String,
    technologies: Option<Json<Vec<String>>>,
    github: String,
    video: Option<String>,
    tags: Option<Json<Vec<String>>>,
    created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            technologies: row.technologies.map(|j| j.0).unwrap_or_default(),
            github: row.github,
            video: row.video,
            tags: row.tags.map(|j| j.0).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioStore for PgStore {
    async fn initialize(&self, seed: &AdminSeed) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        for statement in schema::ALL {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }

        let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&mut *tx)
            .await?;

        if admins == 0 {
            let hash = hash_password(&seed.password).await?;
            sqlx::query(
                "INSERT INTO admin_users (username, password_hash) VALUES ($1, $2) \
                 ON CONFLICT (username) DO NOTHING",
            )
            .bind(&seed.username)
            .bind(&hash)
            .execute(&mut *tx)
            .await?;
            info!("Seeded default admin user '{}'", seed.username);
        }

        tx.commit().await?;
        info!("Database schema ready");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, description, technologies, github, video, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(Json(&project.technologies))
        .bind(&project.github)
        .bind(&project.video)
        .bind(Json(&project.tags))
        .fetch_one(&self.pool)
        .await?;

        info!("Created project {} ({})", row.id, row.name);
        Ok(row.into())
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Project::from))
    }

    async fn update_project(
        &self,
        id: i64,
        project: NewProject,
    ) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = $1, description = $2, technologies = $3,
                github = $4, video = $5, tags = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(Json(&project.technologies))
        .bind(&project.github)
        .bind(&project.video)
        .bind(Json(&project.tags))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Contact, StoreError> {
        Ok(sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, email, message) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save_resume(&self, filename: &str, url: &str) -> Result<Resume, StoreError> {
        // Delete + insert in one transaction so readers never see zero rows.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM resume").execute(&mut *tx).await?;

        let resume = sqlx::query_as::<_, Resume>(
            "INSERT INTO resume (filename, url) VALUES ($1, $2) RETURNING *",
        )
        .bind(filename)
        .bind(url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Replaced current resume with {filename}");
        Ok(resume)
    }

    async fn current_resume(&self) -> Result<Option<Resume>, StoreError> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT * FROM resume ORDER BY uploaded_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn admin_password_hash(&self, username: &str) -> Result<Option<String>, StoreError> {
        Ok(
            sqlx::query_scalar("SELECT password_hash FROM admin_users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO admin_sessions (token, username, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(username)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn session_is_active(&self, token: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        Ok(sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM admin_sessions WHERE token = $1 AND expires_at > $2)",
        )
        .bind(token)
        .bind(now)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
