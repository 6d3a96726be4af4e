//! Data transfer objects for the service layer.

mod item_dto;
mod token_dto;

pub use item_dto::*;
pub use token_dto::*;
