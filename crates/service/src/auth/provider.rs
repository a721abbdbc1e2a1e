//! Session acquisition. Every mutation and protected page starts here.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::domain::{AuthUser, Session};
use super::errors::AuthError;

/// Resolves a bearer token into a [`Session`], or fails with an auth error.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn acquire(&self, token: Option<&str>) -> Result<Session, AuthError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Sign an HS256 token for `user`, valid for `ttl`.
pub fn issue_token(secret: &str, user: &AuthUser, ttl: Duration) -> Result<(String, DateTime<Utc>), AuthError> {
    let now = Utc::now();
    let expires_at = now + ttl;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok((token, expires_at))
}

/// Stateless provider validating HS256 JWTs issued by [`issue_token`].
pub struct JwtAuthProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn acquire(&self, token: Option<&str>) -> Result<Session, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingSession)?;
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AuthError::InvalidSession("subject is not a uuid".into()))?;
        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or_else(|| AuthError::InvalidSession("exp out of range".into()))?;
        debug!(%user_id, "session acquired");
        Ok(Session { user_id, email: data.claims.email, expires_at })
    }
}

/// Fixed-answer provider for tests and doc examples
pub mod mock {
    use super::*;

    /// Returns the configured session for any non-empty token, or fails
    /// with [`AuthError::MissingSession`] when none is configured.
    pub struct StaticAuthProvider {
        session: Option<Session>,
    }

    impl StaticAuthProvider {
        pub fn signed_in(user_id: Uuid) -> Self {
            Self {
                session: Some(Session {
                    user_id,
                    email: format!("{user_id}@example.com"),
                    expires_at: Utc::now() + Duration::hours(1),
                }),
            }
        }

        pub fn signed_out() -> Self { Self { session: None } }
    }

    #[async_trait]
    impl AuthProvider for StaticAuthProvider {
        async fn acquire(&self, _token: Option<&str>) -> Result<Session, AuthError> {
            self.session.clone().ok_or(AuthError::MissingSession)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser { id: Uuid::new_v4(), email: "ana@example.com".into() }
    }

    #[tokio::test]
    async fn issued_token_round_trips_into_a_session() {
        let u = user();
        let (token, exp) = issue_token("secret", &u, Duration::hours(1)).unwrap();
        let session = JwtAuthProvider::new("secret").acquire(Some(&token)).await.unwrap();
        assert_eq!(session.user_id, u.id);
        assert_eq!(session.email, u.email);
        assert_eq!(session.expires_at.timestamp(), exp.timestamp());
    }

    #[tokio::test]
    async fn missing_token_is_missing_session() {
        let provider = JwtAuthProvider::new("secret");
        assert!(matches!(provider.acquire(None).await, Err(AuthError::MissingSession)));
        assert!(matches!(provider.acquire(Some("  ")).await, Err(AuthError::MissingSession)));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid_session() {
        let (token, _) = issue_token("secret", &user(), Duration::hours(1)).unwrap();
        let res = JwtAuthProvider::new("other").acquire(Some(&token)).await;
        assert!(matches!(res, Err(AuthError::InvalidSession(_))));
    }

    #[tokio::test]
    async fn expired_token_is_invalid_session() {
        let (token, _) = issue_token("secret", &user(), Duration::hours(-1)).unwrap();
        let res = JwtAuthProvider::new("secret").acquire(Some(&token)).await;
        assert!(matches!(res, Err(AuthError::InvalidSession(_))));
    }
}
