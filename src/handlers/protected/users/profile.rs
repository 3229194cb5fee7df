use axum::extract::{Extension, State};
use serde::Serialize;

use crate::handlers::protected::auth::session::UserEnvelope;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::models::{Preferences, PreferencesPatch, ProfilePatch};
use crate::services::AppServices;

#[derive(Debug, Serialize)]
pub struct PreferencesEnvelope {
    pub preferences: Preferences,
}

/// GET /api/users/profile
pub async fn profile_get(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UserEnvelope> {
    let user = services.accounts.profile(auth.user_id).await?;
    Ok(ApiResponse::success(UserEnvelope { user }))
}

/// PUT /api/users/profile - Update any of `name`, `bio`, `avatar`
pub async fn profile_put(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(patch): ApiJson<ProfilePatch>,
) -> ApiResult<UserEnvelope> {
    let user = services.accounts.update_profile(auth.user_id, patch).await?;
    Ok(ApiResponse::success(UserEnvelope { user }).with_message("Profile updated successfully"))
}

/// PUT /api/users/preferences - Partial update; omitted fields are kept
pub async fn preferences_put(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(patch): ApiJson<PreferencesPatch>,
) -> ApiResult<PreferencesEnvelope> {
    let preferences = services.accounts.update_preferences(auth.user_id, patch).await?;
    Ok(ApiResponse::success(PreferencesEnvelope { preferences }).with_message("Preferences updated successfully"))
}
