//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenType};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use stockroom_config::SecurityConfig;
use stockroom_core::{StockroomError, StockroomResult, UserId};
use tracing::{debug, warn};

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: i64,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: i64,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Generates a token pair for a user.
    pub fn generate_tokens(&self, user_id: UserId, username: &str) -> StockroomResult<TokenPair> {
        let access_token = self.generate_token(user_id, username, TokenType::Access)?;
        let refresh_token = self.generate_token(user_id, username, TokenType::Refresh)?;

        let access_expires_at = (Utc::now()
            + Duration::seconds(self.config.jwt_access_expiration_secs as i64))
        .timestamp();
        let refresh_expires_at = (Utc::now()
            + Duration::seconds(self.config.jwt_refresh_expiration_secs as i64))
        .timestamp();

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Generates a single token of the given type.
    pub fn generate_token(
        &self,
        user_id: UserId,
        username: &str,
        token_type: TokenType,
    ) -> StockroomResult<String> {
        let expiration_secs = match token_type {
            TokenType::Access => self.config.jwt_access_expiration_secs,
            TokenType::Refresh => self.config.jwt_refresh_expiration_secs,
        };
        let expires_at = Utc::now() + Duration::seconds(expiration_secs as i64);

        let claims = Claims::new(
            user_id,
            username.to_string(),
            token_type,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            StockroomError::Internal(format!("Failed to generate {} token: {}", token_type, e))
        })?;

        debug!("Generated {} token for user {}", token_type, user_id);
        Ok(token)
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> StockroomResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        StockroomError::TokenExpired
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        StockroomError::InvalidToken("Invalid token signature".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        StockroomError::InvalidToken("Invalid token issuer".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        StockroomError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => StockroomError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> StockroomResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(StockroomError::InvalidToken(
                "Expected access token".to_string(),
            ));
        }

        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> StockroomResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_refresh_token() {
            return Err(StockroomError::InvalidToken(
                "Expected refresh token".to_string(),
            ));
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> TokenProvider {
        TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "test-secret".to_string(),
            ..SecurityConfig::default()
        }))
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let provider = test_provider();
        let pair = provider.generate_tokens(UserId(1), "alice").unwrap();

        let claims = provider.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_id(), Some(UserId(1)));
        assert!(claims.is_access_token());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let provider = test_provider();
        let pair = provider.generate_tokens(UserId(1), "alice").unwrap();

        let result = provider.validate_access_token(&pair.refresh_token);
        assert!(matches!(result, Err(StockroomError::InvalidToken(_))));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let provider = test_provider();
        let pair = provider.generate_tokens(UserId(1), "alice").unwrap();

        let result = provider.validate_refresh_token(&pair.access_token);
        assert!(matches!(result, Err(StockroomError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let provider = test_provider();
        let pair = provider.generate_tokens(UserId(1), "alice").unwrap();

        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "different-secret".to_string(),
            ..SecurityConfig::default()
        }));

        assert!(other.validate_access_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let provider = test_provider();
        assert!(provider.validate_token("not-a-jwt").is_err());
    }
}
