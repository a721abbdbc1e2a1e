use tracing::instrument;

use super::{PageGuard, PageOutcome};
use crate::errors::ServiceError;
use crate::profile::repository::ProfileRepository;
use crate::profile::{Profile, ProfileService};

/// Load the caller's own profile page.
#[instrument(skip_all)]
pub async fn load<R: ProfileRepository + ?Sized>(
    guard: &PageGuard,
    profiles: &ProfileService<R>,
    token: Option<&str>,
) -> Result<PageOutcome<Profile>, ServiceError> {
    let session = match guard.session(token).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let profile = profiles.get(session.user_id).await?;
    Ok(PageOutcome::Render(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use uuid::Uuid;

    use crate::auth::provider::mock::StaticAuthProvider;
    use crate::profile::repository::mock::MockProfileRepository;

    #[tokio::test]
    async fn renders_own_profile_or_redirects() {
        let repo = Arc::new(MockProfileRepository::default());
        let user = Uuid::new_v4();
        repo.seed(user, json!({"name": "Ana"}).as_object().cloned().unwrap()).await;
        let profiles = ProfileService::new(repo);

        let guard = PageGuard::new(Arc::new(StaticAuthProvider::signed_in(user)), "/login");
        let PageOutcome::Render(p) = load(&guard, &profiles, Some("t")).await.unwrap() else { panic!("expected render") };
        assert_eq!(p.id, user);
        assert_eq!(p.fields["name"], "Ana");

        let guard = PageGuard::new(Arc::new(StaticAuthProvider::signed_out()), "/entrar");
        assert_eq!(load(&guard, &profiles, None).await.unwrap(), PageOutcome::Redirect("/entrar".into()));
    }
}
