use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Clock, ServiceError, UserLocks};
use crate::models::{ReadingProgressEntry, ReadingStats, ReadingStreak, RecentBook};
use crate::store::UserRepository;
use crate::tracker::ReadingTracker;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InProgressView {
    pub in_progress_books: Vec<ReadingProgressEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionView {
    pub completed_books: Vec<String>,
    pub stats: ReadingStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverview {
    pub in_progress_books: Vec<ReadingProgressEntry>,
    pub recent_books: Vec<RecentBook>,
    pub completed_books: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub stats: ReadingStats,
    pub reading_streak: ReadingStreak,
}

/// Loads a reader, applies the tracker, saves the result, one writer per user.
pub struct ReadingService {
    users: Arc<dyn UserRepository>,
    tracker: ReadingTracker,
    locks: UserLocks,
    clock: Clock,
}

impl ReadingService {
    pub fn new(users: Arc<dyn UserRepository>, tracker: ReadingTracker, locks: UserLocks, clock: Clock) -> Self {
        Self {
            users,
            tracker,
            locks,
            clock,
        }
    }

    pub async fn record_progress(
        &self,
        user_id: Uuid,
        book_id: &str,
        current_page: i64,
        total_pages: i64,
    ) -> Result<InProgressView, ServiceError> {
        let _guard = self.locks.lock(user_id).await;
        let mut user = self.users.get_404(user_id).await?;
        let now = self.clock.now();

        let outcome = self
            .tracker
            .record_progress(&mut user, book_id, current_page, total_pages, now)?;
        debug!(
            %user_id,
            book_id,
            created = outcome.created,
            percent = outcome.progress_percent,
            streak = ?outcome.streak,
            "recorded reading progress"
        );

        let view = InProgressView {
            in_progress_books: user.in_progress_books.clone(),
        };
        self.users.save(user).await?;
        Ok(view)
    }

    pub async fn complete_book(&self, user_id: Uuid, book_id: &str) -> Result<CompletionView, ServiceError> {
        let _guard = self.locks.lock(user_id).await;
        let mut user = self.users.get_404(user_id).await?;
        let now = self.clock.now();

        let outcome = self.tracker.complete_book(&mut user, book_id, now)?;
        if outcome.newly_completed {
            info!(%user_id, book_id, "book completed");
        }

        let view = CompletionView {
            completed_books: user.completed_books.clone(),
            stats: user.stats.clone(),
        };
        self.users.save(user).await?;
        Ok(view)
    }

    pub async fn overview(&self, user_id: Uuid) -> Result<ProgressOverview, ServiceError> {
        let user = self.users.get_404(user_id).await?;
        Ok(ProgressOverview {
            in_progress_books: user.in_progress_books,
            recent_books: user.recent_books,
            completed_books: user.completed_books,
        })
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<StatsView, ServiceError> {
        let user = self.users.get_404(user_id).await?;
        Ok(StatsView {
            stats: user.stats,
            reading_streak: user.reading_streak,
        })
    }
}
