use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::Duration;
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession};
use super::errors::AuthError;
use super::provider::issue_token;
use super::repository::AuthRepository;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub password_algorithm: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), password_algorithm: "argon2".into(), token_ttl: Duration::hours(12) }
    }
}

/// Account provisioning and login, independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new account with a hashed password and a seeded profile.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret"));
    /// let input = RegisterInput { email: "ana@example.com".into(), name: "Ana".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "ana@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        models::validation::validate_email(&input.email)?;
        if input.name.trim().is_empty() {
            return Err(AuthError::Validation("name required".into()));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_account_by_email(&input.email).await? {
            debug!("account exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo
            .provision(&input.email, input.name.trim(), hash, self.cfg.password_algorithm.clone())
            .await?;
        info!(user_id = %user.id, email = %user.email, "account_registered");
        Ok(user)
    }

    /// Authenticate an account and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret"));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_account_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let (token, expires_at) = issue_token(&self.cfg.jwt_secret, &user, self.cfg.token_ttl)?;
        info!(user_id = %user.id, "login_succeeded");
        Ok(AuthSession { user, token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::RegisterInput;
    use crate::auth::provider::{AuthProvider, JwtAuthProvider};
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::profile::repository::{mock::MockProfileRepository, ProfileRepository};

    fn svc_with_profiles() -> (AuthService<MockAuthRepository>, Arc<MockProfileRepository>) {
        let profiles = Arc::new(MockProfileRepository::default());
        let repo = Arc::new(MockAuthRepository::with_profiles(profiles.clone()));
        (AuthService::new(repo, AuthConfig::new("secret")), profiles)
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput { email: email.into(), name: "Ana".into(), password: password.into() }
    }

    #[tokio::test]
    async fn register_seeds_profile_name() {
        let (svc, profiles) = svc_with_profiles();
        let user = svc.register(input("ana@example.com", "Secret123")).await.unwrap();
        let profile = profiles.get(user.id).await.unwrap().unwrap();
        assert_eq!(profile.fields["name"], "Ana");
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_duplicates() {
        let (svc, _) = svc_with_profiles();
        assert!(matches!(svc.register(input("a@b.cl", "short")).await, Err(AuthError::Validation(_))));
        svc.register(input("a@b.cl", "LongEnough1")).await.unwrap();
        assert!(matches!(svc.register(input("A@B.cl", "LongEnough1")).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn register_rejects_bad_email() {
        let (svc, _) = svc_with_profiles();
        assert!(matches!(svc.register(input("nobody", "LongEnough1")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn login_issues_token_accepted_by_provider() {
        let (svc, _) = svc_with_profiles();
        let user = svc.register(input("ana@example.com", "Secret123")).await.unwrap();
        let session = svc.login(LoginInput { email: "ana@example.com".into(), password: "Secret123".into() }).await.unwrap();
        let acquired = JwtAuthProvider::new("secret").acquire(Some(&session.token)).await.unwrap();
        assert_eq!(acquired.user_id, user.id);
    }

    #[tokio::test]
    async fn login_wrong_password_or_unknown_account_is_unauthorized() {
        let (svc, _) = svc_with_profiles();
        svc.register(input("ana@example.com", "Secret123")).await.unwrap();
        let wrong = svc.login(LoginInput { email: "ana@example.com".into(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let unknown = svc.login(LoginInput { email: "who@example.com".into(), password: "Secret123".into() }).await;
        assert!(matches!(unknown, Err(AuthError::Unauthorized)));
    }
}
