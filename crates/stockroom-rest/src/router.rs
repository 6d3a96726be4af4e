//! Main application router.

use crate::{
    controllers::{
        health_controller::{self, ReadinessProbe},
        item_controller, token_controller,
    },
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    state::AppState,
};
use axum::{middleware, Router};
use std::sync::Arc;
use stockroom_config::ServerConfig;
use stockroom_security::TokenProvider;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
///
/// Item routes sit behind the auth middleware; token issuance and health
/// checks are open.
pub fn create_router(
    state: AppState,
    token_provider: Arc<TokenProvider>,
    probe: Arc<dyn ReadinessProbe>,
    server_config: &ServerConfig,
) -> Router {
    let cors = create_cors_layer(server_config);
    let auth_state = AuthMiddlewareState::new(token_provider);

    let items_router = item_controller::router()
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api_router = Router::new()
        .nest("/items", items_router)
        .nest("/token", token_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router(probe))
        .merge(api_router)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}
