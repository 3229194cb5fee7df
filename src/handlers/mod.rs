// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth). Protected routes receive the
// caller as an `AuthUser` extension inserted by `jwt_auth_middleware`.
pub mod protected; // JWT authentication required (/api/*)
pub mod public; // No authentication required (/, /health, /auth/*)
