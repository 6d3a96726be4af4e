//! Token-related DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to obtain a token pair from credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenObtainRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Request to refresh an access token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// Token pair issued on successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

/// Fresh access token issued from a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}
