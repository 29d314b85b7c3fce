pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as resumes;
use crate::profiles::handlers as profiles;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/v1/profiles", post(profiles::handle_create_profile))
        .route(
            "/api/v1/profiles/:user_key",
            get(profiles::handle_get_profile).put(profiles::handle_update_profile),
        )
        // Resume API
        .route("/api/v1/resumes/generate", post(resumes::handle_generate))
        .route(
            "/api/v1/resumes/:user_key/draft",
            get(resumes::handle_get_draft).put(resumes::handle_update_draft),
        )
        .route(
            "/api/v1/resumes/:user_key/pdf",
            get(render::handle_download_pdf),
        )
        // Email API
        .route("/api/v1/email/analyze", post(resumes::handle_analyze_email))
        .with_state(state)
}
