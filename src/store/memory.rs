use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthRepository, StoreError, UserRepository};
use crate::models::user::normalize_email;
use crate::models::{AuthRecord, UserRecord};

/// Process-local store. Data lives as long as the server process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
    auth: Arc<RwLock<HashMap<String, AuthRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(format!("user id {}", user.id)));
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn save(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("User {} not found", user.id))),
        }
    }
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn find_auth(&self, email: &str) -> Result<Option<AuthRecord>, StoreError> {
        Ok(self.auth.read().await.get(&normalize_email(email)).cloned())
    }

    async fn insert_auth(&self, record: AuthRecord) -> Result<(), StoreError> {
        let mut auth = self.auth.write().await;
        if auth.contains_key(&record.email) {
            return Err(StoreError::Duplicate(format!("email {}", record.email)));
        }
        auth.insert(record.email.clone(), record);
        Ok(())
    }

    async fn save_auth(&self, record: AuthRecord) -> Result<(), StoreError> {
        let mut auth = self.auth.write().await;
        match auth.get_mut(&record.email) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("Credentials for {} not found", record.email))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn insert_then_lookup_by_id_and_email() {
        let store = MemoryStore::new();
        let user = UserRecord::new("Mira", "Mira@Example.com", Utc::now());
        store.insert(user.clone()).await.unwrap();

        assert_eq!(store.get(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_email(" MIRA@example.com").await.unwrap(), Some(user));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.insert(UserRecord::new("A", "same@example.com", Utc::now())).await.unwrap();

        let err = store
            .insert(UserRecord::new("B", "same@example.com", Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn save_requires_existing_record() {
        let store = MemoryStore::new();
        let mut user = UserRecord::new("A", "a@example.com", Utc::now());

        assert!(matches!(store.save(user.clone()).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.get_404(user.id).await, Err(StoreError::NotFound(_))));

        store.insert(user.clone()).await.unwrap();
        user.bio = "Reads on the train".to_string();
        store.save(user.clone()).await.unwrap();
        assert_eq!(store.get_404(user.id).await.unwrap().bio, "Reads on the train");
    }
}
