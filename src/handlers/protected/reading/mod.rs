pub mod complete;
pub mod progress;

pub use complete::complete_post;
pub use progress::{progress_get, progress_put};
