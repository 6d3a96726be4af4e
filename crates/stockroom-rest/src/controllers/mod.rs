//! HTTP controllers.

pub mod health_controller;
pub mod item_controller;
pub mod token_controller;
