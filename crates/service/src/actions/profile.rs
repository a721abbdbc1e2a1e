use crate::cache::routes;
use crate::envelope::ActionResult;
use crate::mutation::MutationContext;
use crate::profile::repository::ProfileRepository;
use crate::profile::{Profile, ProfilePatch, ProfileService};

/// Update the caller's own profile. The target id always comes from the
/// session, never from the request.
pub async fn update_profile<R: ProfileRepository + ?Sized>(
    ctx: &MutationContext,
    profiles: &ProfileService<R>,
    token: Option<&str>,
    patch: ProfilePatch,
) -> ActionResult<Profile> {
    ctx.run("update_profile", token, &[routes::PERFIL], move |session| async move {
        profiles.update(session.user_id, &patch).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::{json, Map};
    use uuid::Uuid;

    use crate::auth::provider::mock::StaticAuthProvider;
    use crate::cache::mock::RecordingInvalidator;
    use crate::envelope::{success, ActionError, ErrorKind};
    use crate::profile::repository::mock::MockProfileRepository;

    fn patch(v: serde_json::Value) -> ProfilePatch {
        ProfilePatch(v.as_object().cloned().unwrap())
    }

    struct Fixture {
        repo: Arc<MockProfileRepository>,
        profiles: ProfileService<MockProfileRepository>,
        invalidator: Arc<RecordingInvalidator>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(MockProfileRepository::default());
        Fixture { profiles: ProfileService::new(repo.clone()), repo, invalidator: Arc::new(RecordingInvalidator::default()) }
    }

    fn ctx(f: &Fixture, auth: StaticAuthProvider) -> MutationContext {
        MutationContext::new(Arc::new(auth), f.invalidator.clone())
    }

    #[tokio::test]
    async fn valid_patch_returns_updated_profile() {
        let f = fixture();
        let u1 = Uuid::new_v4();
        f.repo.seed(u1, Map::new()).await;
        let ctx = ctx(&f, StaticAuthProvider::signed_in(u1));

        let res = update_profile(&ctx, &f.profiles, Some("t"), patch(json!({"name": "Ana"}))).await;

        let expected = Profile { id: u1, fields: json!({"name": "Ana"}).as_object().cloned().unwrap() };
        assert_eq!(res, success(expected));
        assert_eq!(f.invalidator.routes().await, vec![routes::PERFIL.to_string()]);
    }

    #[tokio::test]
    async fn no_session_is_auth_error_and_repository_untouched() {
        let f = fixture();
        let ctx = ctx(&f, StaticAuthProvider::signed_out());

        let res = update_profile(&ctx, &f.profiles, None, patch(json!({"name": "Ana"}))).await;

        let err = res.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Auth);
        assert!(!err.message.is_empty());
        assert!(res.data().is_none());
        assert_eq!(f.repo.update_calls(), 0);
        assert!(f.invalidator.routes().await.is_empty());
    }

    #[tokio::test]
    async fn repository_validation_error_passes_through() {
        let f = fixture();
        let u1 = Uuid::new_v4();
        f.repo.seed(u1, Map::new()).await;
        let ctx = ctx(&f, StaticAuthProvider::signed_in(u1));

        let res = update_profile(&ctx, &f.profiles, Some("t"), ProfilePatch::default()).await;

        assert_eq!(res.error(), Some(&ActionError::validation("name required")));
        assert_eq!(f.repo.update_calls(), 1);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let f = fixture();
        let ctx = ctx(&f, StaticAuthProvider::signed_in(Uuid::new_v4()));
        let res = update_profile(&ctx, &f.profiles, Some("t"), patch(json!({"name": "Ana"}))).await;
        assert_eq!(res.error().unwrap().kind, ErrorKind::NotFound);
    }
}
