// Idempotent DDL applied by `PgStore::initialize` at startup.
// Statements run in order; each must be safe to re-run.

pub const CREATE_PROJECTS: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id           BIGSERIAL PRIMARY KEY,
    name         VARCHAR(255) NOT NULL,
    description  TEXT NOT NULL,
    technologies JSONB NOT NULL DEFAULT '[]'::jsonb,
    github       VARCHAR(500) NOT NULL,
    video        VARCHAR(500),
    tags         JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_CONTACTS: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id         BIGSERIAL PRIMARY KEY,
    name       VARCHAR(255) NOT NULL,
    email      VARCHAR(255) NOT NULL,
    message    TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_RESUME: &str = r#"
CREATE TABLE IF NOT EXISTS resume (
    id          BIGSERIAL PRIMARY KEY,
    filename    VARCHAR(255) NOT NULL,
    url         VARCHAR(500) NOT NULL,
    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_ADMIN_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS admin_users (
    id            BIGSERIAL PRIMARY KEY,
    username      VARCHAR(100) UNIQUE NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_ADMIN_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS admin_sessions (
    token      VARCHAR(64) PRIMARY KEY,
    username   VARCHAR(100) NOT NULL REFERENCES admin_users (username) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    expires_at TIMESTAMPTZ NOT NULL
)
"#;

pub const CREATE_SESSION_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_admin_sessions_expires_at ON admin_sessions (expires_at)";

pub const ALL: &[&str] = &[
    CREATE_PROJECTS,
    CREATE_CONTACTS,
    CREATE_RESUME,
    CREATE_ADMIN_USERS,
    CREATE_ADMIN_SESSIONS,
    CREATE_SESSION_EXPIRY_INDEX,
];
