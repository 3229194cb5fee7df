//! Reading progress and daily streak rules.
//!
//! Everything here is synchronous and operates on a `UserRecord` owned by the
//! caller. Fetching and persisting the record is the service layer's job.

pub mod progress;
pub mod streak;

use chrono::{DateTime, FixedOffset, Utc};
use thiserror::Error;

use crate::models::UserRecord;

pub use progress::{progress_percent, PagePosition};
pub use streak::{advance_streak, calendar_day, StreakTransition};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Book '{0}' is already completed")]
    AlreadyCompleted(String),
}

impl TrackerError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TrackerError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOutcome {
    pub created: bool,
    pub progress_percent: u8,
    pub streak: StreakTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// False when the book was already in the completed set.
    pub newly_completed: bool,
    pub was_in_progress: bool,
}

/// Stateless rule set; holds only the settings that shape the rules.
#[derive(Debug, Clone, Copy)]
pub struct ReadingTracker {
    offset: FixedOffset,
    recent_books_limit: usize,
}

impl ReadingTracker {
    pub fn new(offset: FixedOffset, recent_books_limit: usize) -> Self {
        Self {
            offset,
            recent_books_limit: recent_books_limit.max(1),
        }
    }

    /// Record that the user is on `current_page` of `book_id` at `now`.
    ///
    /// Validates before touching `user`, so an error leaves the record as it was.
    pub fn record_progress(
        &self,
        user: &mut UserRecord,
        book_id: &str,
        current_page: i64,
        total_pages: i64,
        now: DateTime<Utc>,
    ) -> Result<ProgressOutcome, TrackerError> {
        let book_id = validate_book_id(book_id)?;
        let position = PagePosition::new(current_page, total_pages)?;
        if user.has_completed(book_id) {
            return Err(TrackerError::AlreadyCompleted(book_id.to_string()));
        }

        let created = progress::upsert_entry(&mut user.in_progress_books, book_id, position, now);
        let streak = advance_streak(&mut user.reading_streak, now, self.offset);
        progress::touch_recent(
            &mut user.recent_books,
            book_id,
            position.current_page,
            now,
            self.recent_books_limit,
        );
        user.updated_at = now;

        Ok(ProgressOutcome {
            created,
            progress_percent: position.percent(),
            streak,
        })
    }

    /// Move `book_id` from in-progress to completed. Repeating the call is a no-op
    /// apart from `updated_at`; the streak is never touched.
    pub fn complete_book(
        &self,
        user: &mut UserRecord,
        book_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome, TrackerError> {
        let book_id = validate_book_id(book_id)?;

        let before = user.in_progress_books.len();
        user.in_progress_books.retain(|entry| entry.book_id != book_id);
        let was_in_progress = user.in_progress_books.len() != before;

        let newly_completed = !user.has_completed(book_id);
        if newly_completed {
            user.completed_books.push(book_id.to_string());
            user.stats.total_books_completed += 1;
        }
        user.updated_at = now;

        Ok(CompletionOutcome {
            newly_completed,
            was_in_progress,
        })
    }
}

fn validate_book_id(book_id: &str) -> Result<&str, TrackerError> {
    let trimmed = book_id.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::invalid("bookId", "must not be empty"));
    }
    Ok(trimmed)
}
