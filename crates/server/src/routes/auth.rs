use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use service::auth::domain::{AuthUser, LoginInput, RegisterInput};
use service::envelope::{handle_error, success, ActionError, ActionResult};

use crate::errors::Envelope;
use crate::extract::AUTH_COOKIE;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Unreadable bodies answer with a `ValidationError` envelope.
fn rejected<T>(e: JsonRejection) -> Envelope<T> {
    Envelope(handle_error(ActionError::validation(e.body_text())))
}

pub async fn register(State(state): State<ServerState>, body: Result<Json<RegisterInput>, JsonRejection>) -> Envelope<AuthUser> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(e) => return rejected(e),
    };
    Envelope(ActionResult::from(state.auth.register(input).await))
}

/// On success the token is returned in the body and set as an HttpOnly cookie.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> (CookieJar, Envelope<LoginOutput>) {
    let input = match body {
        Ok(Json(input)) => input,
        Err(e) => return (jar, rejected(e)),
    };
    let session = match state.auth.login(input).await {
        Ok(session) => session,
        Err(e) => return (jar, Envelope(handle_error(e))),
    };

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.secure_cookies);
    cookie.set_same_site(SameSite::Lax);

    let out = LoginOutput {
        user_id: session.user.id,
        email: session.user.email,
        token: session.token,
        expires_at: session.expires_at,
    };
    (jar.add(cookie), Envelope(success(out)))
}

/// Always sends an expired `auth_token`, whether or not the request carried one.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    (jar.add(cookie), StatusCode::NO_CONTENT)
}
