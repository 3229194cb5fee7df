use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::models::ReadingStreak;

/// What a single read did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// No earlier read on record.
    Started,
    /// Already read on this calendar day.
    SameDay,
    /// Last read was the previous calendar day.
    Continued,
    /// Last read was two or more calendar days ago.
    Reset,
}

/// Calendar day of `at` as seen in the reference timezone.
pub fn calendar_day(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Apply one read at `now` to the streak.
///
/// Days are compared by calendar date in `offset`, not by elapsed hours, so a
/// read at 23:59 followed by one at 00:01 continues the streak. A `now` that
/// falls on an earlier day than the last read is treated like a same-day read.
pub fn advance_streak(streak: &mut ReadingStreak, now: DateTime<Utc>, offset: FixedOffset) -> StreakTransition {
    let Some(last_read_at) = streak.last_read_at else {
        streak.count = 1;
        streak.last_read_at = Some(now);
        streak.longest_streak = streak.longest_streak.max(1);
        return StreakTransition::Started;
    };

    let delta = (calendar_day(now, offset) - calendar_day(last_read_at, offset)).num_days();
    match delta {
        i64::MIN..=0 => StreakTransition::SameDay,
        1 => {
            streak.count += 1;
            streak.last_read_at = Some(now);
            streak.longest_streak = streak.longest_streak.max(streak.count);
            StreakTransition::Continued
        }
        _ => {
            streak.count = 1;
            streak.last_read_at = Some(now);
            StreakTransition::Reset
        }
    }
}
