//! Token issuance service.

use crate::dto::{TokenObtainRequest, TokenPairResponse, TokenRefreshRequest, TokenRefreshResponse};
use async_trait::async_trait;
use std::sync::Arc;
use stockroom_config::SecurityConfig;
use stockroom_core::{StockroomError, StockroomResult, ValidateExt};
use stockroom_repository::UserRepository;
use stockroom_security::{PasswordHasher, TokenProvider, TokenType};
use tracing::{debug, warn};

/// Token service trait.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Verifies credentials and issues an access/refresh token pair.
    async fn obtain_pair(&self, request: TokenObtainRequest) -> StockroomResult<TokenPairResponse>;

    /// Exchanges a valid refresh token for a fresh access token.
    async fn refresh(&self, request: TokenRefreshRequest) -> StockroomResult<TokenRefreshResponse>;
}

/// Token service implementation.
pub struct TokenServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl<R: UserRepository> TokenServiceImpl<R> {
    /// Creates a new token service.
    pub fn new(
        user_repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        security_config: Arc<SecurityConfig>,
    ) -> Self {
        let token_provider = Arc::new(TokenProvider::new(security_config));
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    /// Returns the token provider used for issuing and validating tokens.
    #[must_use]
    pub fn token_provider(&self) -> Arc<TokenProvider> {
        Arc::clone(&self.token_provider)
    }
}

#[async_trait]
impl<R: UserRepository + 'static> TokenService for TokenServiceImpl<R> {
    async fn obtain_pair(&self, request: TokenObtainRequest) -> StockroomResult<TokenPairResponse> {
        debug!("Token pair requested for user: {}", request.username);

        request.validate_request()?;

        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(StockroomError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)?
        {
            warn!("Failed login attempt for user: {}", request.username);
            return Err(StockroomError::InvalidCredentials);
        }

        let tokens = self
            .token_provider
            .generate_tokens(user.id, &user.username)?;

        Ok(TokenPairResponse {
            refresh: tokens.refresh_token,
            access: tokens.access_token,
        })
    }

    async fn refresh(&self, request: TokenRefreshRequest) -> StockroomResult<TokenRefreshResponse> {
        request.validate_request()?;

        let claims = self.token_provider.validate_refresh_token(&request.refresh)?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| StockroomError::InvalidToken("Token has no user id".to_string()))?;

        let access = self
            .token_provider
            .generate_token(user_id, &claims.username, TokenType::Access)?;

        debug!("Refreshed access token for user: {}", claims.username);
        Ok(TokenRefreshResponse { access })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use stockroom_core::{NewUser, User, UserId};

    struct MockUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        fn with_user(user: User) -> Self {
            let repo = Self::new();
            repo.users.lock().unwrap().insert(user.id, user);
            repo
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> StockroomResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn insert(&self, user: &NewUser) -> StockroomResult<User> {
            let id = UserId::from_i64(self.users.lock().unwrap().len() as i64 + 1);
            let user = User {
                id,
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
                created_at: chrono::Utc::now(),
            };
            self.users.lock().unwrap().insert(id, user.clone());
            Ok(user)
        }

        async fn count(&self) -> StockroomResult<u64> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
    }

    fn test_user(hasher: &PasswordHasher, username: &str, password: &str) -> User {
        User {
            id: UserId::from_i64(1),
            username: username.to_string(),
            password_hash: hasher.hash(password).unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    fn test_service(repo: MockUserRepository, hasher: PasswordHasher) -> TokenServiceImpl<MockUserRepository> {
        TokenServiceImpl::new(
            Arc::new(repo),
            Arc::new(hasher),
            Arc::new(SecurityConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_obtain_pair_with_valid_credentials() {
        let hasher = PasswordHasher::new();
        let repo = MockUserRepository::with_user(test_user(&hasher, "alice", "s3cret-pw"));
        let service = test_service(repo, hasher);

        let response = service
            .obtain_pair(TokenObtainRequest {
                username: "alice".to_string(),
                password: "s3cret-pw".to_string(),
            })
            .await
            .unwrap();

        assert!(!response.access.is_empty());
        assert!(!response.refresh.is_empty());
        assert_ne!(response.access, response.refresh);
    }

    #[tokio::test]
    async fn test_obtain_pair_with_wrong_password() {
        let hasher = PasswordHasher::new();
        let repo = MockUserRepository::with_user(test_user(&hasher, "alice", "s3cret-pw"));
        let service = test_service(repo, hasher);

        let err = service
            .obtain_pair(TokenObtainRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StockroomError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_obtain_pair_with_unknown_user() {
        let service = test_service(MockUserRepository::new(), PasswordHasher::new());

        let err = service
            .obtain_pair(TokenObtainRequest {
                username: "nobody".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StockroomError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let hasher = PasswordHasher::new();
        let repo = MockUserRepository::with_user(test_user(&hasher, "alice", "s3cret-pw"));
        let service = test_service(repo, hasher);

        let pair = service
            .obtain_pair(TokenObtainRequest {
                username: "alice".to_string(),
                password: "s3cret-pw".to_string(),
            })
            .await
            .unwrap();

        let refreshed = service
            .refresh(TokenRefreshRequest {
                refresh: pair.refresh,
            })
            .await
            .unwrap();

        let claims = service
            .token_provider()
            .validate_access_token(&refreshed.access)
            .unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let hasher = PasswordHasher::new();
        let repo = MockUserRepository::with_user(test_user(&hasher, "alice", "s3cret-pw"));
        let service = test_service(repo, hasher);

        let pair = service
            .obtain_pair(TokenObtainRequest {
                username: "alice".to_string(),
                password: "s3cret-pw".to_string(),
            })
            .await
            .unwrap();

        let err = service
            .refresh(TokenRefreshRequest {
                refresh: pair.access,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StockroomError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let service = test_service(MockUserRepository::new(), PasswordHasher::new());

        let err = service
            .refresh(TokenRefreshRequest {
                refresh: "not-a-jwt".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StockroomError::InvalidToken(_)));
    }
}
