use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

pub const AUTH_COOKIE: &str = "auth_token";

/// Raw session token sent by the caller, if any.
///
/// Read from `Authorization: Bearer <token>` first, then from the
/// `auth_token` cookie. Never rejects; validation happens in the
/// auth provider so a missing token becomes an envelope error or a
/// redirect instead of an extractor failure.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> { self.0.as_deref() }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if bearer.is_some() {
            return Ok(Self(bearer));
        }
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(jar.get(AUTH_COOKIE).map(|c| c.value().to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> SessionToken {
        let (mut parts, _) = req.into_parts();
        SessionToken::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn bearer_wins_over_cookie() {
        let req = Request::builder()
            .header("authorization", "Bearer abc")
            .header("cookie", "auth_token=xyz")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn falls_back_to_cookie_then_none() {
        let req = Request::builder().header("cookie", "theme=dark; auth_token=xyz").body(()).unwrap();
        assert_eq!(extract(req).await.as_deref(), Some("xyz"));

        let req = Request::builder().header("authorization", "Basic Zm9v").body(()).unwrap();
        assert_eq!(extract(req).await.as_deref(), None);
    }
}
