//! Request extractors.

mod claims;
mod json;

pub use claims::AuthenticatedUser;
pub use json::ApiJson;
