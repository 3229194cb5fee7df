use axum::extract::{Extension, Path, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{AppServices, CompletionView};

/// POST /api/complete/:book_id - Mark a book as finished
///
/// Safe to repeat: the book is listed once and counted once. Completing a
/// book that was never started is allowed.
pub async fn complete_post(
    State(services): State<AppServices>,
    Extension(auth): Extension<AuthUser>,
    Path(book_id): Path<String>,
) -> ApiResult<CompletionView> {
    let view = services.reading.complete_book(auth.user_id, &book_id).await?;
    Ok(ApiResponse::success(view).with_message("Book marked as completed"))
}
