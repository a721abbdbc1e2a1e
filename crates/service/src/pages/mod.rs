//! Server-side page loaders. Protected pages redirect to the login path
//! instead of rendering an error when the caller has no session.

pub mod perfil;
pub mod servicios;

use std::sync::Arc;

use tracing::debug;

use crate::auth::domain::Session;
use crate::auth::provider::AuthProvider;

/// What the HTTP layer should do with a page request.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Render(T),
    /// Navigate the browser to this path; nothing was fetched.
    Redirect(String),
}

impl<T> PageOutcome<T> {
    pub fn is_redirect(&self) -> bool { matches!(self, PageOutcome::Redirect(_)) }
}

/// Session check shared by every protected page.
#[derive(Clone)]
pub struct PageGuard {
    auth: Arc<dyn AuthProvider>,
    login_path: String,
}

impl PageGuard {
    pub fn new(auth: Arc<dyn AuthProvider>, login_path: impl Into<String>) -> Self {
        Self { auth, login_path: login_path.into() }
    }

    pub fn login_path(&self) -> &str { &self.login_path }

    /// The caller's session, or the redirect to send instead.
    pub async fn session<T>(&self, token: Option<&str>) -> Result<Session, PageOutcome<T>> {
        match self.auth.acquire(token).await {
            Ok(session) => Ok(session),
            Err(e) => {
                debug!(reason = %e, to = %self.login_path, "redirecting unauthenticated page load");
                Err(PageOutcome::Redirect(self.login_path.clone()))
            }
        }
    }
}
