use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

/// One async mutex per user, created on first use.
///
/// Holding the guard across load → mutate → save makes each user's updates
/// single-writer while different users proceed in parallel.
#[derive(Clone, Default)]
pub struct UserLocks {
    locks: Arc<RwLock<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    pub async fn lock(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        // Fast path: try read lock
        let existing = {
            let locks = self.locks.read().await;
            locks.get(&user_id).cloned()
        };

        let lock = match existing {
            Some(lock) => lock,
            None => {
                let mut locks = self.locks.write().await;
                locks.entry(user_id).or_default().clone()
            }
        };

        lock.lock_owned().await
    }
}
