use axum::extract::{Extension, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{AppServices, StatsView};

/// GET /api/users/stats - Reading stats and the current streak
pub async fn stats_get(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<StatsView> {
    let stats = services.reading.stats(auth.user_id).await?;
    Ok(ApiResponse::success(stats))
}
