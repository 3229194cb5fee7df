pub mod account_service;
pub mod clock;
pub mod locks;
pub mod reading_service;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::{JwtError, TokenIssuer};
use crate::config::AppConfig;
use crate::store::{MemoryStore, StoreError};
use crate::tracker::{ReadingTracker, TrackerError};

pub use account_service::{AccountService, LoginRequest, Session, SignupRequest};
pub use clock::Clock;
pub use locks::UserLocks;
pub use reading_service::{CompletionView, InProgressView, ProgressOverview, ReadingService, StatsView};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{message}")]
    Validation {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<AccountService>,
    pub reading: Arc<ReadingService>,
    pub tokens: TokenIssuer,
}

impl AppServices {
    /// Wire services over a process-local store.
    pub fn in_memory(config: &AppConfig, clock: Clock) -> Self {
        let store = MemoryStore::new();
        let locks = UserLocks::default();
        let tokens = TokenIssuer::from_config(&config.security);
        let tracker = ReadingTracker::new(
            config.tracker.reference_offset(),
            config.tracker.recent_books_limit,
        );

        let accounts = Arc::new(AccountService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            tokens.clone(),
            locks.clone(),
            clock.clone(),
            config.security.min_password_length,
            config.security.password_hash_cost,
        ));
        let reading = Arc::new(ReadingService::new(Arc::new(store), tracker, locks, clock));

        Self {
            accounts,
            reading,
            tokens,
        }
    }
}
