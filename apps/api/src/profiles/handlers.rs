//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::profiles::{NewProfileRequest, ProfileUpdate};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_key: String,
    pub profile: Profile,
}

/// POST /api/v1/profiles
///
/// Signup. Stores the profile under the key derived from its email,
/// overwriting any existing document for that key.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(request): Json<NewProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let profile = request.into_profile()?;
    let user_key = profile.user_key();

    state.profiles.set(&user_key, &profile).await?;
    info!("Created profile {user_key}");

    Ok((StatusCode::CREATED, Json(ProfileResponse { user_key, profile })))
}

/// GET /api/v1/profiles/:user_key
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = load_profile(&state, &user_key).await?;
    Ok(Json(ProfileResponse { user_key, profile }))
}

/// PUT /api/v1/profiles/:user_key
///
/// Profile edit: read, apply the supplied sections, write back.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut profile = load_profile(&state, &user_key).await?;
    update.apply_to(&mut profile);

    state.profiles.set(&user_key, &profile).await?;
    info!("Updated profile {user_key}");

    Ok(Json(ProfileResponse { user_key, profile }))
}

/// Loads a profile or fails with 404.
pub async fn load_profile(state: &AppState, user_key: &str) -> Result<Profile, AppError> {
    state
        .profiles
        .get(user_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_key} not found")))
}
