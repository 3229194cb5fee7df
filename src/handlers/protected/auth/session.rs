use axum::extract::{Extension, State};
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::UserRecord;
use crate::services::AppServices;

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserRecord,
}

/// GET /api/auth/me - Current user behind the bearer token
///
/// A valid token for an account that no longer exists answers 404.
pub async fn whoami(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UserEnvelope> {
    let user = services.accounts.profile(auth.user_id).await?;
    Ok(ApiResponse::success(UserEnvelope { user }))
}
