//! Application state for Axum handlers.

use std::sync::Arc;
use stockroom_service::{ItemService, TokenService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub item_service: Arc<dyn ItemService>,
    pub token_service: Arc<dyn TokenService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(item_service: Arc<dyn ItemService>, token_service: Arc<dyn TokenService>) -> Self {
        Self {
            item_service,
            token_service,
        }
    }
}
