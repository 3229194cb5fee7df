use axum::extract::State;
use serde_json::Value;

use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::services::{AppServices, LoginRequest, Session, SignupRequest};

/// POST /auth/signup - Create an email/password account and receive a JWT
///
/// Expected Input:
/// ```json
/// { "name": "string", "email": "string", "password": "string (min 6)" }
/// ```
///
/// Expected Output (201):
/// ```json
/// {
///   "success": true,
///   "message": "User registered successfully",
///   "data": { "user": { "id": "uuid", "email": "...", ... }, "token": "eyJ...", "expiresIn": 604800 }
/// }
/// ```
pub async fn signup(
    State(services): State<AppServices>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> ApiResult<Session> {
    let session = services.accounts.signup(payload).await?;
    Ok(ApiResponse::created(session).with_message("User registered successfully"))
}

/// POST /auth/login - Authenticate with email and password
///
/// Unknown email and wrong password both answer 401 with the same message.
pub async fn login(
    State(services): State<AppServices>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Session> {
    let session = services.accounts.login(payload).await?;
    Ok(ApiResponse::success(session).with_message("Login successful"))
}

/// POST /auth/logout - Tokens are stateless; the client discards its copy.
pub async fn logout() -> ApiResult<Value> {
    Ok(ApiResponse::success(Value::Null).with_message("Logout successful"))
}
