pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AuthRecord, UserRecord};

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    Duplicate(String),
}

/// Persistence for reader records. The tracker never sees this; services load a
/// record, hand it to the tracker, then save it back.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new record. Fails with `Duplicate` when the id or email is taken.
    async fn insert(&self, user: UserRecord) -> Result<(), StoreError>;

    /// Replace an existing record. Fails with `NotFound` when absent.
    async fn save(&self, user: UserRecord) -> Result<(), StoreError>;

    /// Fetch or fail with `NotFound`.
    async fn get_404(&self, user_id: Uuid) -> Result<UserRecord, StoreError> {
        self.get(user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user_id)))
    }
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_auth(&self, email: &str) -> Result<Option<AuthRecord>, StoreError>;

    async fn insert_auth(&self, record: AuthRecord) -> Result<(), StoreError>;

    async fn save_auth(&self, record: AuthRecord) -> Result<(), StoreError>;
}
