use axum::extract::{Extension, Path, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{AppServices, InProgressView, ProgressOverview};

/// Page counts are taken as signed integers so that zero or negative values
/// reach the tracker and come back as field-level validation errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub current_page: Option<i64>,
    pub total_pages: Option<i64>,
}

/// GET /api/progress - In-progress, recent and completed books
pub async fn progress_get(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<ProgressOverview> {
    let overview = services.reading.overview(auth.user_id).await?;
    Ok(ApiResponse::success(overview))
}

/// PUT /api/progress/:book_id - Record the caller's position in a book
///
/// Expected Input:
/// ```json
/// { "currentPage": 90, "totalPages": 180 }
/// ```
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "message": "Reading progress updated successfully",
///   "data": {
///     "inProgressBooks": [
///       { "bookId": "b1", "currentPage": 90, "totalPages": 180, "progressPercent": 50,
///         "startedAt": "2025-01-21T09:00:00Z", "lastReadAt": "2025-01-21T09:00:00Z" }
///     ]
///   }
/// }
/// ```
///
/// Errors: 400 for missing, non-positive or out-of-range pages; 404 when the
/// account is gone; 409 when the book is already completed.
pub async fn progress_put(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
    Path(book_id): Path<String>,
    ApiJson(update): ApiJson<ProgressUpdate>,
) -> ApiResult<InProgressView> {
    let current_page = update.current_page.ok_or_else(|| required("currentPage"))?;
    let total_pages = update.total_pages.ok_or_else(|| required("totalPages"))?;

    let view = services
        .reading
        .record_progress(auth.user_id, &book_id, current_page, total_pages)
        .await?;
    Ok(ApiResponse::success(view).with_message("Reading progress updated successfully"))
}

fn required(field: &str) -> ApiError {
    ApiError::validation_error(
        format!("{} is required", field),
        Some([(field.to_string(), "This field is required".to_string())].into()),
    )
}
