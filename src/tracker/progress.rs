use chrono::{DateTime, Utc};

use crate::models::{ReadingProgressEntry, RecentBook};

use super::TrackerError;

/// Whole-number percentage of `current_page` over `total_pages`, halves rounded up,
/// clamped to 0..=100. A zero page count yields 0.
pub fn progress_percent(current_page: u32, total_pages: u32) -> u8 {
    if total_pages == 0 {
        return 0;
    }
    let (current, total) = (u64::from(current_page), u64::from(total_pages));
    let rounded = (200 * current + total) / (2 * total);
    rounded.min(100) as u8
}

/// Validated page position for a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PagePosition {
    pub fn new(current_page: i64, total_pages: i64) -> Result<Self, TrackerError> {
        let total_pages = u32::try_from(total_pages)
            .ok()
            .filter(|total| *total >= 1)
            .ok_or_else(|| TrackerError::invalid("totalPages", "must be a positive integer"))?;
        let current_page = u32::try_from(current_page)
            .ok()
            .filter(|current| *current >= 1)
            .ok_or_else(|| TrackerError::invalid("currentPage", "must be a positive integer"))?;
        if current_page > total_pages {
            return Err(TrackerError::invalid(
                "currentPage",
                format!("page {} is past the last page {}", current_page, total_pages),
            ));
        }
        Ok(Self {
            current_page,
            total_pages,
        })
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.current_page, self.total_pages)
    }
}

/// Insert or update the entry for `book_id`. Returns true when a new entry was created.
pub fn upsert_entry(
    entries: &mut Vec<ReadingProgressEntry>,
    book_id: &str,
    position: PagePosition,
    now: DateTime<Utc>,
) -> bool {
    match entries.iter_mut().find(|entry| entry.book_id == book_id) {
        Some(entry) => {
            entry.current_page = position.current_page;
            entry.total_pages = position.total_pages;
            entry.progress_percent = position.percent();
            entry.last_read_at = now;
            false
        }
        None => {
            entries.push(ReadingProgressEntry {
                book_id: book_id.to_string(),
                current_page: position.current_page,
                total_pages: position.total_pages,
                progress_percent: position.percent(),
                started_at: now,
                last_read_at: now,
            });
            true
        }
    }
}

/// Move `book_id` to the front of the recent list, keeping at most `limit` books.
pub fn touch_recent(recent: &mut Vec<RecentBook>, book_id: &str, last_page: u32, now: DateTime<Utc>, limit: usize) {
    recent.retain(|book| book.book_id != book_id);
    recent.insert(
        0,
        RecentBook {
            book_id: book_id.to_string(),
            last_page,
            last_opened_at: now,
        },
    );
    recent.truncate(limit);
}
