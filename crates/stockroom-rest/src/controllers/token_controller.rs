//! Token issuance controller.

use crate::{
    extractors::ApiJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Router};
use stockroom_service::{
    TokenObtainRequest, TokenPairResponse, TokenRefreshRequest, TokenRefreshResponse,
};
use tracing::debug;

/// Creates the token router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(obtain_pair))
        .route("/refresh/", post(refresh))
}

/// Obtain an access/refresh token pair from credentials.
async fn obtain_pair(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenObtainRequest>,
) -> ApiResult<TokenPairResponse> {
    debug!("Token pair request for user: {}", request.username);

    let response = state.token_service.obtain_pair(request).await?;
    ok(response)
}

/// Exchange a refresh token for a fresh access token.
async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRefreshRequest>,
) -> ApiResult<TokenRefreshResponse> {
    let response = state.token_service.refresh(request).await?;
    ok(response)
}
