//! # Stockroom Config
//!
//! Layered configuration for Stockroom: TOML files plus `STOCKROOM_`
//! environment variable overrides.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::*;
