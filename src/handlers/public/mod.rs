// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus service info and liveness. Everything here must
// validate its own input; there is no trusted user context.

pub mod auth;
pub mod info;
