//! # Stockroom Repository
//!
//! Data access layer for Stockroom using SQLx/MySQL.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ItemRepository>   (domain interface)
//! MySqlItemRepository            (SQLx / MySQL)
//!   ↓
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
