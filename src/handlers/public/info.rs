use axum::response::Json;
use serde_json::{json, Value};

/// GET / - Service description and route map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Pagewise API",
            "version": version,
            "description": "Reading progress and streak tracking for the Pagewise reader",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "public_auth": "/auth/signup, /auth/login, /auth/logout (public - token acquisition)",
                "auth": "/api/auth/me (protected)",
                "users": "/api/users/profile, /api/users/preferences, /api/users/stats (protected)",
                "progress": "/api/progress[/:book_id] (protected)",
                "complete": "/api/complete/:book_id (protected)",
            }
        }
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
