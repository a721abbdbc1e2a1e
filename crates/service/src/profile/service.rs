use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Profile, ProfilePatch};
use super::repository::ProfileRepository;
use crate::errors::ServiceError;

pub const MAX_FIELDS: usize = 32;
pub const MAX_KEY_LEN: usize = 64;

/// Application service for reading and editing a caller's own profile.
pub struct ProfileService<R: ProfileRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProfileRepository + ?Sized> ProfileService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get(&self, id: Uuid) -> Result<Profile, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("profile"))
    }

    /// Apply `patch` to the profile owned by `id`.
    #[instrument(skip(self, patch), fields(user_id = %id, keys = patch.fields().len()))]
    pub async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Profile, ServiceError> {
        if patch.fields().len() > MAX_FIELDS {
            return Err(ServiceError::Validation(format!("too many fields (<= {MAX_FIELDS})")));
        }
        if let Some(key) = patch.fields().keys().find(|k| k.trim().is_empty() || k.len() > MAX_KEY_LEN) {
            return Err(ServiceError::Validation(format!("invalid field name: {key:?}")));
        }
        let updated = self.repo.update(id, patch).await?;
        info!("profile_updated");
        Ok(updated)
    }
}
