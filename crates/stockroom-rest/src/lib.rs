//! # Stockroom REST
//!
//! REST API layer using Axum for Stockroom.
//! Provides HTTP endpoints for item management, token issuance, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use controllers::health_controller::ReadinessProbe;
pub use router::*;
pub use state::*;
