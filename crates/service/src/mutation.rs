//! Runner every mutation endpoint goes through: authenticate, run the
//! domain operation, invalidate affected views, wrap the outcome.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::domain::Session;
use crate::auth::provider::AuthProvider;
use crate::cache::CacheInvalidator;
use crate::envelope::{handle_error, success, ActionResult};

#[derive(Clone)]
pub struct MutationContext {
    auth: Arc<dyn AuthProvider>,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl MutationContext {
    pub fn new(auth: Arc<dyn AuthProvider>, invalidator: Arc<dyn CacheInvalidator>) -> Self {
        Self { auth, invalidator }
    }

    /// Run `op` for the caller identified by `token`.
    ///
    /// Without a valid session `op` is never called. `affected` routes are
    /// invalidated only after `op` succeeds.
    #[instrument(skip_all, fields(action = name))]
    pub async fn run<T, E, F, Fut>(&self, name: &'static str, token: Option<&str>, affected: &[&str], op: F) -> ActionResult<T>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let session = match self.auth.acquire(token).await {
            Ok(session) => session,
            Err(e) => return handle_error(e),
        };
        let user_id = session.user_id;
        match op(session).await {
            Ok(value) => {
                for route in affected {
                    self.invalidator.invalidate(route).await;
                }
                info!(%user_id, "action_succeeded");
                success(value)
            }
            Err(e) => handle_error(e),
        }
    }
}
