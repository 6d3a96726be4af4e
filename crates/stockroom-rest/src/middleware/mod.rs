//! HTTP middleware.

mod auth;
mod logging;

pub use auth::{auth_middleware, AuthMiddlewareState};
pub use logging::logging_middleware;
