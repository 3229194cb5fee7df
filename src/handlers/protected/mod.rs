// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware injects `AuthUser` into request extensions.

pub mod auth; // Current session
pub mod reading; // Reading progress, completion, streak
pub mod users; // Profile, preferences, stats
