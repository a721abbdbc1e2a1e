use async_trait::async_trait;
use models::profile::Fields;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use super::domain::{Profile, ProfilePatch};
use crate::errors::ServiceError;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Profile>, ServiceError>;
    async fn create(&self, id: Uuid, fields: Fields) -> Result<Profile, ServiceError>;
    /// Merge `patch` into the stored fields and return the updated profile.
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Profile, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProfileRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Profile>, ServiceError> {
        let found = models::profile::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?;
        Ok(found.map(Profile::from))
    }

    async fn create(&self, id: Uuid, fields: Fields) -> Result<Profile, ServiceError> {
        Ok(models::profile::create(&self.db, id, fields).await?.into())
    }

    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Profile, ServiceError> {
        Ok(models::profile::update_fields(&self.db, id, patch.fields()).await?.into())
    }
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use models::errors::ModelError;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockProfileRepository {
        rows: RwLock<HashMap<Uuid, Fields>>,
        update_calls: AtomicUsize,
    }

    impl MockProfileRepository {
        /// Store `fields` as-is, skipping validation.
        pub async fn seed(&self, id: Uuid, fields: Fields) {
            self.rows.write().await.insert(id, fields);
        }

        pub fn update_calls(&self) -> usize { self.update_calls.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn get(&self, id: Uuid) -> Result<Option<Profile>, ServiceError> {
            let rows = self.rows.read().await;
            Ok(rows.get(&id).map(|fields| Profile { id, fields: fields.clone() }))
        }

        async fn create(&self, id: Uuid, fields: Fields) -> Result<Profile, ServiceError> {
            let mut seeded = Fields::new();
            models::profile::apply_patch(&mut seeded, &fields)?;
            self.rows.write().await.insert(id, seeded.clone());
            Ok(Profile { id, fields: seeded })
        }

        async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Profile, ServiceError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.write().await;
            let current = rows
                .get(&id)
                .ok_or_else(|| ModelError::NotFound("profile not found".into()))?;
            let mut merged = current.clone();
            models::profile::apply_patch(&mut merged, patch.fields())?;
            rows.insert(id, merged.clone());
            Ok(Profile { id, fields: merged })
        }
    }
}
