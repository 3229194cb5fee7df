use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading position for one book the user has started but not finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgressEntry {
    pub book_id: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub progress_percent: u8,
    pub started_at: DateTime<Utc>,
    pub last_read_at: DateTime<Utc>,
}

/// Consecutive calendar days with at least one recorded read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStreak {
    pub count: u32,
    pub last_read_at: Option<DateTime<Utc>>,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBook {
    pub book_id: String,
    pub last_page: u32,
    pub last_opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub total_books_completed: u32,
    pub total_minutes_read: u32,
    pub total_highlights: u32,
    pub total_chats: u32,
    /// Pages per minute.
    pub average_reading_speed: f64,
    pub total_pages_read: u32,
}
