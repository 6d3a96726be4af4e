//! MySQL repository implementations.

mod item_repository;
mod user_repository;

pub use item_repository::MySqlItemRepository;
pub use user_repository::MySqlUserRepository;
