pub mod profile;
pub mod stats;

pub use profile::{preferences_put, profile_get, profile_put};
pub use stats::stats_get;
