use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::profiles::{fetch_profile, upsert_profile};
use crate::dto::{ProfileResponse, UpdateProfileRequest};
use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = fetch_profile(&state.db, auth_user.id)
        .await?
        .map(ProfileResponse::from)
        .unwrap_or_else(|| ProfileResponse::empty(auth_user.id));

    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    body.validate()?;
    let update = body.normalize().map_err(AppError::Validation)?;

    let profile = upsert_profile(&state.db, auth_user.id, &update).await?;

    tracing::info!(user_id = %auth_user.id, "Profile updated");

    Ok(Json(profile.into()))
}
