pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::chatbot::handlers as chatbot;
use crate::contacts::handlers as contacts;
use crate::projects::handlers as projects;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::uploads::{handlers as uploads, policy::UploadKind, serve};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Admin session
        .route(
            "/api/auth",
            post(auth::handle_login).delete(auth::handle_logout),
        )
        .route("/api/auth/check", get(auth::handle_check))
        // Projects
        .route(
            "/api/projects",
            get(projects::handle_list_projects).post(projects::handle_create_project),
        )
        .route(
            "/api/projects/:id",
            get(projects::handle_get_project)
                .put(projects::handle_update_project)
                .delete(projects::handle_delete_project),
        )
        // Contact form
        .route("/api/contact", post(contacts::handle_submit_contact))
        .route("/api/contacts", get(contacts::handle_list_contacts))
        // Resume and uploads
        .route("/api/resume", get(resume::handle_current_resume))
        .route(
            "/api/upload/resume",
            post(uploads::handle_upload_resume)
                .layer(DefaultBodyLimit::max(UploadKind::Resume.body_limit())),
        )
        .route(
            "/api/upload",
            post(uploads::handle_upload_video)
                .layer(DefaultBodyLimit::max(UploadKind::Video.body_limit())),
        )
        .route("/uploads/*path", get(serve::handle_serve_upload))
        // Chatbot
        .route("/api/chatbot", post(chatbot::handle_chat))
        .with_state(state)
}
