use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use super::{Clock, ServiceError, UserLocks};
use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::models::user::{normalize_email, MAX_BIO_LENGTH, MAX_FONT_SIZE, MAX_NAME_LENGTH, MIN_FONT_SIZE};
use crate::models::{AuthRecord, Preferences, PreferencesPatch, ProfilePatch, UserRecord};
use crate::store::{AuthRepository, StoreError, UserRepository};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
    pub expires_in: i64,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    auth: Arc<dyn AuthRepository>,
    tokens: TokenIssuer,
    locks: UserLocks,
    clock: Clock,
    min_password_length: usize,
    password_hash_cost: u32,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        auth: Arc<dyn AuthRepository>,
        tokens: TokenIssuer,
        locks: UserLocks,
        clock: Clock,
        min_password_length: usize,
        password_hash_cost: u32,
    ) -> Self {
        Self {
            users,
            auth,
            tokens,
            locks,
            clock,
            min_password_length,
            password_hash_cost,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<Session, ServiceError> {
        let (name, email, password) = match (request.name, request.email, request.password) {
            (Some(name), Some(email), Some(password))
                if !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty() =>
            {
                (name, email, password)
            }
            _ => {
                return Err(ServiceError::validation(
                    None,
                    "Name, email, and password are required",
                ))
            }
        };

        if !is_valid_email(&email) {
            return Err(ServiceError::validation(
                Some("email"),
                "Please provide a valid email address",
            ));
        }
        if password.chars().count() < self.min_password_length {
            return Err(ServiceError::validation(
                Some("password"),
                format!("Password must be at least {} characters long", self.min_password_length),
            ));
        }
        validate_name(&name)?;

        let now = self.clock.now();
        let user = UserRecord::new(&name, &email, now);
        if self.users.find_by_email(&user.email).await?.is_some() {
            return Err(ServiceError::Conflict("User with this email already exists".to_string()));
        }

        let cost = self.password_hash_cost;
        let password_hash = task::spawn_blocking(move || hash_password(&password, cost)).await??;
        let auth = AuthRecord {
            email: user.email.clone(),
            password_hash,
            user_id: user.id,
            provider: "email".to_string(),
            last_login_at: now,
            created_at: now,
        };

        self.users.insert(user.clone()).await.map_err(duplicate_as_conflict)?;
        self.auth.insert_auth(auth).await.map_err(duplicate_as_conflict)?;

        let token = self.tokens.issue(user.id, &user.email, now)?;
        info!(user_id = %user.id, "account created");
        Ok(Session {
            user,
            token,
            expires_in: self.tokens.expires_in_secs(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Session, ServiceError> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => (email, password),
            _ => return Err(ServiceError::validation(None, "Email and password are required")),
        };

        let Some(mut auth) = self.auth.find_auth(&email).await? else {
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        let stored_hash = auth.password_hash.clone();
        let matches = task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;
        if !matches {
            warn!(email = %normalize_email(&email), "failed login attempt");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let user = self.users.get_404(auth.user_id).await?;
        let now = self.clock.now();
        auth.last_login_at = now;
        self.auth.save_auth(auth).await?;

        let token = self.tokens.issue(user.id, &user.email, now)?;
        Ok(Session {
            user,
            token,
            expires_in: self.tokens.expires_in_secs(),
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserRecord, ServiceError> {
        Ok(self.users.get_404(user_id).await?)
    }

    pub async fn update_profile(&self, user_id: Uuid, patch: ProfilePatch) -> Result<UserRecord, ServiceError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(bio) = &patch.bio {
            if bio.chars().count() > MAX_BIO_LENGTH {
                return Err(ServiceError::validation(
                    Some("bio"),
                    format!("Bio must be at most {} characters", MAX_BIO_LENGTH),
                ));
            }
        }

        let _guard = self.locks.lock(user_id).await;
        let mut user = self.users.get_404(user_id).await?;
        if let Some(name) = patch.name {
            user.name = name.trim().to_string();
        }
        if let Some(bio) = patch.bio {
            user.bio = bio;
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar).filter(|url| !url.trim().is_empty());
        }
        user.updated_at = self.clock.now();

        self.users.save(user.clone()).await?;
        Ok(user)
    }

    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        patch: PreferencesPatch,
    ) -> Result<Preferences, ServiceError> {
        if let Some(size) = patch.font_size {
            if !(i64::from(MIN_FONT_SIZE)..=i64::from(MAX_FONT_SIZE)).contains(&size) {
                return Err(ServiceError::validation(
                    Some("fontSize"),
                    format!("Font size must be between {} and {}", MIN_FONT_SIZE, MAX_FONT_SIZE),
                ));
            }
        }

        let _guard = self.locks.lock(user_id).await;
        let mut user = self.users.get_404(user_id).await?;
        patch.apply_to(&mut user.preferences);
        user.updated_at = self.clock.now();

        let preferences = user.preferences.clone();
        self.users.save(user).await?;
        Ok(preferences)
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(Some("name"), "Name must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ServiceError::validation(
            Some("name"),
            format!("Name must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace.
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn duplicate_as_conflict(err: StoreError) -> ServiceError {
    match err {
        StoreError::Duplicate(_) => ServiceError::Conflict("User with this email already exists".to_string()),
        other => ServiceError::Store(other),
    }
}

impl ServiceError {
    fn validation(field: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let field_errors = field.map(|field| HashMap::from([(field.to_string(), message.clone())]));
        ServiceError::Validation { message, field_errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MIN_HASH_COST;
    use crate::models::user::Theme;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn service() -> (AccountService, MemoryStore) {
        service_with_cost(MIN_HASH_COST)
    }

    fn service_with_cost(cost: u32) -> (AccountService, MemoryStore) {
        let store = MemoryStore::new();
        let service = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            TokenIssuer::new("test-secret", 24),
            UserLocks::default(),
            Clock::fixed(Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()),
            6,
            cost,
        );
        (service, store)
    }

    fn signup_request(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: Some("Ravi".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  first.last@example.org "));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@@example.com"));
    }

    #[tokio::test]
    async fn signup_then_login() {
        let (service, _store) = service();

        let session = service
            .signup(signup_request("Ravi@Example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "ravi@example.com");
        assert!(!session.token.is_empty());

        let login = service
            .login(LoginRequest {
                email: Some("ravi@example.com".to_string()),
                password: Some("secret1".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(login.user.id, session.user.id);
    }

    #[tokio::test]
    async fn signup_rejects_bad_input() {
        let (service, _store) = service();

        let missing = service.signup(SignupRequest::default()).await.unwrap_err();
        assert!(matches!(missing, ServiceError::Validation { .. }));

        let short = service.signup(signup_request("a@example.com", "12345")).await.unwrap_err();
        assert!(matches!(short, ServiceError::Validation { .. }));

        let email = service.signup(signup_request("not-an-email", "123456")).await.unwrap_err();
        assert!(matches!(email, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let (service, store) = service();
        service.signup(signup_request("dup@example.com", "123456")).await.unwrap();

        let err = service
            .signup(signup_request("DUP@example.com", "123456"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (service, _store) = service();
        service.signup(signup_request("x@example.com", "123456")).await.unwrap();

        for (email, password) in [("x@example.com", "654321"), ("nobody@example.com", "123456")] {
            let err = service
                .login(LoginRequest {
                    email: Some(email.to_string()),
                    password: Some(password.to_string()),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn profile_and_preferences_updates() {
        let (service, _store) = service();
        let user_id = service
            .signup(signup_request("p@example.com", "123456"))
            .await
            .unwrap()
            .user
            .id;

        let user = service
            .update_profile(
                user_id,
                ProfilePatch {
                    name: Some("  Ravi K ".to_string()),
                    bio: Some("Night reader".to_string()),
                    avatar: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(user.name, "Ravi K");
        assert_eq!(user.bio, "Night reader");

        let too_long = ProfilePatch {
            bio: Some("x".repeat(MAX_BIO_LENGTH + 1)),
            ..Default::default()
        };
        assert!(service.update_profile(user_id, too_long).await.is_err());

        let preferences = service
            .update_preferences(
                user_id,
                PreferencesPatch {
                    theme: Some(Theme::Dark),
                    font_size: Some(20),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(preferences.theme, Theme::Dark);
        assert_eq!(preferences.font_size, 20);

        for size in [40, 300, -1] {
            let bad_size = PreferencesPatch {
                font_size: Some(size),
                ..Default::default()
            };
            match service.update_preferences(user_id, bad_size).await {
                Err(ServiceError::Validation {
                    field_errors: Some(fields),
                    ..
                }) => assert!(fields.contains_key("fontSize")),
                other => panic!("font size {} should be a fontSize validation error, got {:?}", size, other),
            }
        }
        assert_eq!(service.profile(user_id).await.unwrap().preferences.font_size, 20);
    }

    #[tokio::test]
    async fn stored_credentials_are_bcrypt_hashes() {
        let (service, store) = service();
        service.signup(signup_request("hash@example.com", "123456")).await.unwrap();

        let auth = store.find_auth("hash@example.com").await.unwrap().unwrap();
        assert!(auth.password_hash.starts_with("$2"));
        assert!(!auth.password_hash.contains("123456"));
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_an_internal_error() {
        let (service, store) = service();
        service.signup(signup_request("broken@example.com", "123456")).await.unwrap();

        let mut auth = store.find_auth("broken@example.com").await.unwrap().unwrap();
        auth.password_hash = "plain-text".to_string();
        store.save_auth(auth).await.unwrap();

        let err = service
            .login(LoginRequest {
                email: Some("broken@example.com".to_string()),
                password: Some("123456".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PasswordHash(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn hashing_does_not_block_the_runtime() {
        let (service, _store) = service_with_cost(bcrypt::DEFAULT_COST);
        let signup = tokio::spawn(async move { service.signup(signup_request("slow@example.com", "123456")).await });

        // On a single-threaded runtime an inline hash would finish before this timer fires.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(!signup.is_finished());

        let session = signup.await.unwrap().unwrap();
        assert_eq!(session.user.email, "slow@example.com");
    }
}
