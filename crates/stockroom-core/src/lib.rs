//! # Stockroom Core
//!
//! Core types, domain entities, and error definitions for Stockroom.
//! This crate provides the foundational abstractions used across all layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
