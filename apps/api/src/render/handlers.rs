//! Axum route handlers for PDF delivery.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::render::ResumeTemplate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub template: Option<String>,
}

/// GET /api/v1/resumes/:user_key/pdf?template=classic|compact
///
/// Renders the user's current draft and returns it as a download.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    Query(query): Query<PdfQuery>,
) -> Result<impl IntoResponse, AppError> {
    let template = match query.template.as_deref() {
        None => ResumeTemplate::default(),
        Some(name) => ResumeTemplate::from_name(name)
            .ok_or_else(|| AppError::Validation(format!("Unknown template '{name}'")))?,
    };

    let draft = state
        .drafts
        .load(&user_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No resume draft for {user_key}")))?;

    let pdf = state
        .pdf
        .render_pdf(&user_key, &draft.record, template)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"Resume.pdf\"",
            ),
        ],
        pdf,
    ))
}
