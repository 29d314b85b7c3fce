mod config;
mod db;
mod drafts;
mod errors;
mod generation;
mod llm_client;
mod models;
mod profiles;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::drafts::DraftStore;
use crate::generation::generator::{ModelSelection, ResumeGenerator};
use crate::llm_client::GroqClient;
use crate::profiles::store::PgProfileStore;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL profile store
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let profiles = Arc::new(PgProfileStore::new(db));

    // Initialize Redis draft store
    let redis = redis::Client::open(config.redis_url.clone())?;
    let drafts = DraftStore::new(redis, config.draft_ttl_secs);
    info!("Redis draft store initialized (ttl={}s)", config.draft_ttl_secs);

    // Initialize completion client and generator
    let completion = Arc::new(GroqClient::new(
        config.completion_url.clone(),
        config.groq_api_key.clone(),
    ));
    let models = ModelSelection {
        generation: config.generation_model.clone(),
        advisor: config.advisor_model.clone(),
    };
    info!(
        "Completion client initialized (generation: {}, advisor: {})",
        models.generation, models.advisor
    );
    let generator = ResumeGenerator::new(completion, models);

    // Initialize PDF renderer
    let pdf = PdfRenderer::new(config.wkhtmltopdf_path.clone(), config.output_dir.clone());
    info!(
        "PDF renderer: {} -> {}",
        config.wkhtmltopdf_path.display(),
        config.output_dir.display()
    );

    let state = AppState {
        profiles,
        generator,
        drafts,
        pdf,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
