use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credentials for an email/password account. Never sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub email: String,
    /// bcrypt modular-crypt string; carries its own salt and cost.
    pub password_hash: String,
    pub user_id: Uuid,
    pub provider: String,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
