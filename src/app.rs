use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::AppServices;

/// Build the full router: public routes, JWT-protected `/api` routes, global layers.
pub fn app(services: AppServices, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(public::info::root))
        .route("/health", get(public::info::health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(services.clone()))
        .fallback(route_not_found)
        // Body extractors reject oversized payloads with 413
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config)),
        )
        .with_state(services)
}

fn auth_public_routes() -> Router<AppServices> {
    use public::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

fn protected_routes(services: AppServices) -> Router<AppServices> {
    use protected::{auth, reading, users};

    Router::new()
        // Session
        .route("/api/auth/me", get(auth::session_whoami))
        // Profile and settings
        .route("/api/users/profile", get(users::profile_get).put(users::profile_put))
        .route("/api/users/preferences", put(users::preferences_put))
        .route("/api/users/stats", get(users::stats_get))
        // Reading progress
        .route("/api/progress", get(reading::progress_get))
        .route("/api/progress/:book_id", put(reading::progress_put))
        .route("/api/complete/:book_id", post(reading::complete_post))
        .route_layer(middleware::from_fn_with_state(services, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
