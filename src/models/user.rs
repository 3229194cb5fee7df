use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::progress::{ReadingProgressEntry, ReadingStats, ReadingStreak, RecentBook};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;

/// Everything the server keeps about a reader, minus credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub favorites: Vec<String>,
    pub recent_books: Vec<RecentBook>,
    pub completed_books: Vec<String>,
    pub in_progress_books: Vec<ReadingProgressEntry>,
    pub reading_streak: ReadingStreak,
    pub stats: ReadingStats,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Fresh account with empty reading history. `name` and `email` are normalized here.
    pub fn new(name: &str, email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            avatar: None,
            bio: String::new(),
            favorites: Vec::new(),
            recent_books: Vec::new(),
            completed_books: Vec::new(),
            in_progress_books: Vec::new(),
            reading_streak: ReadingStreak::default(),
            stats: ReadingStats::default(),
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn progress_for(&self, book_id: &str) -> Option<&ReadingProgressEntry> {
        self.in_progress_books.iter().find(|entry| entry.book_id == book_id)
    }

    pub fn has_completed(&self, book_id: &str) -> bool {
        self.completed_books.iter().any(|id| id == book_id)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingMode {
    Continuous,
    PageByPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: u8,
    pub font_family: FontFamily,
    pub reading_mode: ReadingMode,
    pub auto_save_highlights: bool,
    pub enable_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            font_size: 16,
            font_family: FontFamily::Serif,
            reading_mode: ReadingMode::Continuous,
            auto_save_highlights: true,
            enable_notifications: true,
        }
    }
}

/// Partial preferences update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    /// Signed so that out-of-range sizes reach range validation instead of failing to parse.
    pub font_size: Option<i64>,
    pub font_family: Option<FontFamily>,
    pub reading_mode: Option<ReadingMode>,
    pub auto_save_highlights: Option<bool>,
    pub enable_notifications: Option<bool>,
}

impl PreferencesPatch {
    pub fn apply_to(&self, preferences: &mut Preferences) {
        if let Some(theme) = self.theme {
            preferences.theme = theme;
        }
        if let Some(size) = self.font_size.and_then(|size| u8::try_from(size).ok()) {
            preferences.font_size = size;
        }
        if let Some(family) = self.font_family {
            preferences.font_family = family;
        }
        if let Some(mode) = self.reading_mode {
            preferences.reading_mode = mode;
        }
        if let Some(flag) = self.auto_save_highlights {
            preferences.auto_save_highlights = flag;
        }
        if let Some(flag) = self.enable_notifications {
            preferences.enable_notifications = flag;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}
