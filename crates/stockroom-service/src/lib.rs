//! # Stockroom Service
//!
//! Business logic service layer for Stockroom.
//! Contains use cases and application services.

pub mod cache;
pub mod dto;
pub mod item_service;
pub mod token_service;

pub use cache::*;
pub use dto::*;
pub use item_service::*;
pub use token_service::*;
