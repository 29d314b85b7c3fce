//! Axum route handlers for the Resume and Email APIs.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drafts::Draft;
use crate::errors::AppError;
use crate::generation::email_advisor::EmailVerdict;
use crate::generation::merger::assemble_record;
use crate::generation::prompt_builder::PromptVariant;
use crate::models::resume::{ContentSource, GeneratedContent, Project, ResumeRecord};
use crate::profiles::handlers::load_profile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_key: String,
    /// Absent is treated like blank and rejected by the handler.
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub extended: bool,
}

/// Resume preview edit. Skills are one per line; projects are
/// `Title: description` lines.
#[derive(Debug, Deserialize)]
pub struct ManualDraftRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub projects: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailAnalysisRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub user_key: String,
    pub source: ContentSource,
    pub resume: ResumeRecord,
}

impl DraftResponse {
    fn new(user_key: String, draft: Draft) -> Self {
        Self {
            user_key,
            source: draft.source,
            resume: draft.record,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Full pipeline: load profile → prompt → completion → parse → merge.
/// Generation failures still return 200 with fallback content.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let job_description = request.job_description.trim();
    if job_description.is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let profile = load_profile(&state, &request.user_key).await?;
    let variant = PromptVariant::from_extended(request.extended);

    let generated = state
        .generator
        .generate(&profile, job_description, variant)
        .await;

    let draft = Draft::new(generated.record, generated.source);
    state.drafts.save(&request.user_key, &draft).await?;

    Ok(Json(DraftResponse::new(request.user_key, draft)))
}

/// GET /api/v1/resumes/:user_key/draft
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = state
        .drafts
        .load(&user_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No resume draft for {user_key}")))?;

    Ok(Json(DraftResponse::new(user_key, draft)))
}

/// PUT /api/v1/resumes/:user_key/draft
///
/// Replaces the draft with hand-edited content over the stored profile.
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    Json(request): Json<ManualDraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let profile = load_profile(&state, &user_key).await?;

    let content = parse_manual_content(&request);
    let record = assemble_record(&profile, content, PromptVariant::Standard);

    let draft = Draft::new(record, ContentSource::Manual);
    state.drafts.save(&user_key, &draft).await?;
    info!("Saved manual draft for {user_key}");

    Ok(Json(DraftResponse::new(user_key, draft)))
}

/// POST /api/v1/email/analyze
pub async fn handle_analyze_email(
    State(state): State<AppState>,
    Json(request): Json<EmailAnalysisRequest>,
) -> Result<Json<EmailVerdict>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    let verdict = state
        .generator
        .analyze_email(request.email.trim(), request.name.trim())
        .await;

    Ok(Json(verdict))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Converts the preview form's text fields into resume content.
fn parse_manual_content(request: &ManualDraftRequest) -> GeneratedContent {
    let skills = request
        .skills
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    // Only the first ':' splits; lines without one are dropped.
    let projects = request
        .projects
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(title, desc)| Project {
            title: title.trim().to_string(),
            desc: desc.trim().to_string(),
        })
        .collect();

    GeneratedContent {
        summary: request.summary.trim().to_string(),
        skills,
        projects,
        suggestions: vec![],
    }
}
