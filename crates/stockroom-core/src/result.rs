//! Result type aliases for Stockroom.

use crate::StockroomError;

/// A specialized `Result` type for Stockroom operations.
pub type StockroomResult<T> = Result<T, StockroomError>;
