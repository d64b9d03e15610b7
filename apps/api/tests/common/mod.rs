#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use folio_api::chatbot::Chatbot;
use folio_api::config::Config;
use folio_api::routes::build_router;
use folio_api::state::AppState;
use folio_api::storage::{MemoryStore, PortfolioStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub uploads: TempDir,
}

pub fn test_config(uploads_dir: &std::path::Path) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        openai_api_key: None,
        openai_model: "gpt-3.5-turbo".to_string(),
        openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        chatbot_timeout: Duration::from_secs(1),
        uploads_dir: uploads_dir.to_path_buf(),
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        app_env: "test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    store
        .insert_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    let dyn_store: Arc<dyn PortfolioStore> = store.clone();
    let state = AppState::new(
        dyn_store,
        Chatbot::fallback_only(),
        test_config(uploads.path()),
    );

    TestApp {
        router: build_router(state),
        store,
        uploads,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// `name=value` pair of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("admin_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Value,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn login(&self) -> String {
        let response = self
            .json(
                Method::POST,
                "/api/auth",
                serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.session_cookie().expect("login sets a session cookie")
    }

    pub async fn upload(
        &self,
        uri: &str,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
        cookie: Option<&str>,
    ) -> TestResponse {
        let boundary = "folio-test-boundary";
        let mut body = Vec::with_capacity(data.len() + 256);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let mut builder = Request::builder().method(Method::POST).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Number of entries in the uploads directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
