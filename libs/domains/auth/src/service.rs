use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{AuthError, AuthResult};
use crate::models::{AuthResponse, LoginRequest, SignupRequest, User, normalize_email};
use crate::password::{Argon2Hasher, CredentialHasher};
use crate::repository::UserRepository;

/// Signup, login and token refresh
#[derive(Clone)]
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    hasher: Arc<dyn CredentialHasher>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
            hasher: Arc::new(Argon2Hasher),
        }
    }

    /// Swap the password hasher, e.g. for a cheaper one in tests.
    pub fn with_hasher(mut self, hasher: impl CredentialHasher + 'static) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Token issuer shared with the bearer-token guard
    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupRequest) -> AuthResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&input.password)?;
        let user = User::new(&input.email, password_hash, input.full_name);

        let user = self
            .repository
            .create(user)
            .await
            .map_err(handle_db_error)?;

        self.issue(user)
    }

    /// Unknown emails fail before any password check; the two failures carry
    /// different messages.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> AuthResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&normalize_email(&input.email))
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AuthError::Unauthorized("Not valid credentials (email)".to_string()))?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            return Err(AuthError::Unauthorized(
                "Not valid credentials (password)".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AuthError::Unauthorized("User is inactive".to_string()));
        }

        self.issue(user)
    }

    /// Reload the user named by a verified token and hand back a new token.
    #[instrument(skip(self))]
    pub async fn check_status(&self, email: &str) -> AuthResult<AuthResponse> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AuthError::Unauthorized("Token not valid".to_string()))?;

        if !user.is_active {
            return Err(AuthError::Unauthorized("User is inactive".to_string()));
        }

        self.issue(user)
    }

    fn issue(&self, user: User) -> AuthResult<AuthResponse> {
        let token = self.jwt.create_token(&user.email)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }
}

fn handle_db_error(err: AuthError) -> AuthError {
    match err {
        AuthError::Database(detail) => {
            tracing::error!(error = %detail, "User store failure");
            AuthError::Internal(detail)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::MockCredentialHasher;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::JwtConfig;
    use mockall::predicate;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-that-is-long-enough-32").unwrap())
    }

    fn signup_input(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "Abc123".to_string(),
            full_name: "Jane Doe".to_string(),
        }
    }

    fn login_input(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_returns_user_and_token_for_email() {
        let jwt = jwt();
        let service = AuthService::new(InMemoryUserRepository::new(), jwt.clone());

        let response = service.signup(signup_input("Jane@Shop.dev")).await.unwrap();

        assert_eq!(response.user.email, "jane@shop.dev");
        assert_eq!(response.user.roles, vec!["user"]);
        let claims = jwt.verify_token(&response.token).unwrap();
        assert_eq!(claims.email, "jane@shop.dev");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict() {
        let service = AuthService::new(InMemoryUserRepository::new(), jwt());
        service.signup(signup_input("jane@shop.dev")).await.unwrap();

        let err = service
            .signup(signup_input("JANE@shop.dev"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Conflict(detail) if detail.contains("jane@shop.dev")));
    }

    #[tokio::test]
    async fn test_signup_rejects_weak_password() {
        let service = AuthService::new(InMemoryUserRepository::new(), jwt());
        let mut input = signup_input("jane@shop.dev");
        input.password = "abcdef".to_string();

        let err = service.signup(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_never_verifies_a_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(predicate::eq("ghost@shop.dev"))
            .times(1)
            .returning(|_| Ok(None));

        let mut hasher = MockCredentialHasher::new();
        hasher.expect_verify().never();

        let service = AuthService::new(repo, jwt()).with_hasher(hasher);
        let err = service
            .login(login_input("ghost@shop.dev", "Abc123"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AuthError::Unauthorized(msg) if msg == "Not valid credentials (email)")
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password_has_distinct_message() {
        let service = AuthService::new(InMemoryUserRepository::new(), jwt());
        service.signup(signup_input("jane@shop.dev")).await.unwrap();

        let err = service
            .login(login_input("jane@shop.dev", "Wrong123"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AuthError::Unauthorized(msg) if msg == "Not valid credentials (password)")
        );
    }

    #[tokio::test]
    async fn test_login_success_normalizes_email() {
        let service = AuthService::new(InMemoryUserRepository::new(), jwt());
        let created = service.signup(signup_input("jane@shop.dev")).await.unwrap();

        let response = service
            .login(login_input("JANE@shop.dev", "Abc123"))
            .await
            .unwrap();
        assert_eq!(response.user.id, created.user.id);
    }

    #[tokio::test]
    async fn test_login_inactive_user_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let service = AuthService::new(repo.clone(), jwt());
        service.signup(signup_input("jane@shop.dev")).await.unwrap();
        assert!(repo.set_active("jane@shop.dev", false).await);

        let err = service
            .login(login_input("jane@shop.dev", "Abc123"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Unauthorized(msg) if msg == "User is inactive"));
    }

    #[tokio::test]
    async fn test_check_status_issues_fresh_token() {
        let jwt = jwt();
        let service = AuthService::new(InMemoryUserRepository::new(), jwt.clone());
        service.signup(signup_input("jane@shop.dev")).await.unwrap();

        let response = service.check_status("jane@shop.dev").await.unwrap();

        assert_eq!(jwt.verify_token(&response.token).unwrap().email, "jane@shop.dev");
    }

    #[tokio::test]
    async fn test_check_status_unknown_user_is_unauthorized() {
        let service = AuthService::new(InMemoryUserRepository::new(), jwt());

        let err = service.check_status("ghost@shop.dev").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AuthError::Database("connection reset".to_string())));

        let service = AuthService::new(repo, jwt());
        let err = service
            .login(login_input("jane@shop.dev", "Abc123"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Internal(_)));
    }
}
