use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_api::chatbot::{ChatCompletion, Chatbot};
use folio_api::config::Config;
use folio_api::db::create_pool;
use folio_api::llm_client::LlmClient;
use folio_api::routes::build_router;
use folio_api::state::AppState;
use folio_api::storage::{AdminSeed, PgStore, PortfolioStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bootstrap the schema
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    let store = PgStore::new(pool);
    store
        .initialize(&AdminSeed {
            username: config.admin_username.clone(),
            password: config.admin_password.clone(),
        })
        .await?;

    if config.uses_default_admin_password() {
        warn!("ADMIN_PASSWORD is not set; the default admin password is in use");
    }

    // Initialize chatbot (fallback-only without a usable API key)
    let chatbot = match config.completion_api_key() {
        Some(key) => {
            let llm = LlmClient::new(
                key.to_string(),
                config.openai_api_url.clone(),
                config.openai_model.clone(),
                config.chatbot_timeout,
            )?;
            info!("LLM client initialized (model: {})", llm.model());
            let completion: Arc<dyn ChatCompletion> = Arc::new(llm);
            Chatbot::new(Some(completion), config.chatbot_timeout)
        }
        None => {
            warn!("OPENAI_API_KEY not configured; chatbot will answer from keyword fallback");
            Chatbot::fallback_only()
        }
    };

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    info!("Serving uploads from {}", config.uploads_dir.display());
    info!(
        "Secure session cookies {} (APP_ENV={})",
        if config.is_production() { "on" } else { "off" },
        config.app_env
    );

    let port = config.port;
    let state = AppState::new(Arc::new(store), chatbot, config);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
