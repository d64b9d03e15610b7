use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Placeholder value shipped in `.env.example`; treated the same as an unset key.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub chatbot_timeout: Duration,
    pub uploads_dir: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    pub app_env: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_COMPLETION_MODEL),
            openai_api_url: env_or("OPENAI_API_URL", DEFAULT_COMPLETION_URL),
            chatbot_timeout: Duration::from_secs(parse_env("CHATBOT_TIMEOUT_SECS", 8)?),
            uploads_dir: resolve_uploads_dir(
                std::env::var("UPLOADS_DIR").ok(),
                std::env::var("VOLUME_MOUNT_PATH").ok(),
            ),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            app_env: env_or("APP_ENV", "development"),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Secure cookies are only sent over HTTPS, so they stay off outside production.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Returns the completion API key, or `None` when the chatbot must run in fallback mode.
    pub fn completion_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}

/// `UPLOADS_DIR` wins; otherwise a mounted volume; otherwise `./uploads`.
fn resolve_uploads_dir(uploads_dir: Option<String>, volume: Option<String>) -> PathBuf {
    if let Some(dir) = uploads_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    match volume.filter(|v| !v.trim().is_empty()) {
        Some(mount) => PathBuf::from(mount).join("uploads"),
        None => PathBuf::from("uploads"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: in-memory friendly, fallback chatbot, dev cookies.
    pub fn for_tests(uploads_dir: PathBuf) -> Self {
        Config {
            database_url: String::new(),
            database_max_connections: 1,
            openai_api_key: None,
            openai_model: DEFAULT_COMPLETION_MODEL.to_string(),
            openai_api_url: DEFAULT_COMPLETION_URL.to_string(),
            chatbot_timeout: Duration::from_secs(1),
            uploads_dir,
            admin_username: "admin".to_string(),
            admin_password: "secret".to_string(),
            app_env: "development".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        let mut config = Config::for_tests(PathBuf::from("uploads"));
        config.openai_api_key = key.map(String::from);
        config
    }

    #[test]
    fn test_completion_key_absent() {
        assert_eq!(config_with_key(None).completion_api_key(), None);
    }

    #[test]
    fn test_completion_key_placeholder_is_ignored() {
        assert_eq!(
            config_with_key(Some(PLACEHOLDER_API_KEY)).completion_api_key(),
            None
        );
        assert_eq!(config_with_key(Some("   ")).completion_api_key(), None);
    }

    #[test]
    fn test_completion_key_present() {
        assert_eq!(
            config_with_key(Some("sk-live")).completion_api_key(),
            Some("sk-live")
        );
    }

    #[test]
    fn test_uploads_dir_resolution_order() {
        assert_eq!(
            resolve_uploads_dir(Some("/srv/files".into()), Some("/data".into())),
            PathBuf::from("/srv/files")
        );
        assert_eq!(
            resolve_uploads_dir(None, Some("/data".into())),
            PathBuf::from("/data/uploads")
        );
        assert_eq!(resolve_uploads_dir(None, None), PathBuf::from("uploads"));
    }

    #[test]
    fn test_production_flag() {
        let mut config = config_with_key(None);
        assert!(!config.is_production());
        config.app_env = "Production".to_string();
        assert!(config.is_production());
    }
}
