pub mod auth;
pub mod progress;
pub mod user;

pub use auth::AuthRecord;
pub use progress::{ReadingProgressEntry, ReadingStats, ReadingStreak, RecentBook};
pub use user::{Preferences, PreferencesPatch, ProfilePatch, UserRecord};
