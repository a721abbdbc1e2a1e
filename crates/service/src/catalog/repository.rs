use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::domain::{CatalogChanges, NewServicio, NewSubservicio, Servicio, Subservicio};
use crate::errors::ServiceError;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_servicios(&self) -> Result<Vec<Servicio>, ServiceError>;
    async fn list_subservicios(&self) -> Result<Vec<Subservicio>, ServiceError>;

    async fn create_servicio(&self, input: NewServicio) -> Result<Servicio, ServiceError>;
    async fn update_servicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Servicio, ServiceError>;
    /// `false` when no row had that id.
    async fn delete_servicio(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn create_subservicio(&self, input: NewSubservicio) -> Result<Subservicio, ServiceError>;
    async fn update_subservicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Subservicio, ServiceError>;
    async fn delete_subservicio(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_servicios(&self) -> Result<Vec<Servicio>, ServiceError> {
        let rows = models::servicio::list(&self.db).await?;
        Ok(rows.into_iter().map(Servicio::from).collect())
    }

    async fn list_subservicios(&self) -> Result<Vec<Subservicio>, ServiceError> {
        let rows = models::subservicio::list(&self.db).await?;
        Ok(rows.into_iter().map(Subservicio::from).collect())
    }

    async fn create_servicio(&self, input: NewServicio) -> Result<Servicio, ServiceError> {
        let row = models::servicio::create(&self.db, &input.name, input.description, input.price_cents, input.active).await?;
        Ok(row.into())
    }

    async fn update_servicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Servicio, ServiceError> {
        Ok(models::servicio::update(&self.db, id, changes.into()).await?.into())
    }

    async fn delete_servicio(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::servicio::delete(&self.db, id).await?)
    }

    async fn create_subservicio(&self, input: NewSubservicio) -> Result<Subservicio, ServiceError> {
        let row = models::subservicio::create(
            &self.db,
            input.servicio_id,
            &input.name,
            input.description,
            input.price_cents,
            input.active,
        )
        .await?;
        Ok(row.into())
    }

    async fn update_subservicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Subservicio, ServiceError> {
        Ok(models::subservicio::update(&self.db, id, changes.into()).await?.into())
    }

    async fn delete_subservicio(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::subservicio::delete(&self.db, id).await?)
    }
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockCatalogRepository {
        servicios: RwLock<Vec<Servicio>>,
        subservicios: RwLock<Vec<Subservicio>>,
        list_calls: AtomicUsize,
    }

    impl MockCatalogRepository {
        /// Number of `list_*` calls so far.
        pub fn list_calls(&self) -> usize { self.list_calls.load(Ordering::SeqCst) }
    }

    fn apply(name: &mut String, description: &mut Option<String>, price: &mut i64, active: &mut bool, c: CatalogChanges) {
        if let Some(n) = c.name { *name = n.trim().to_string(); }
        if let Some(d) = c.description { *description = d; }
        if let Some(p) = c.price_cents { *price = p; }
        if let Some(a) = c.active { *active = a; }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn list_servicios(&self) -> Result<Vec<Servicio>, ServiceError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.servicios.read().await.clone();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(rows)
        }

        async fn list_subservicios(&self) -> Result<Vec<Subservicio>, ServiceError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.subservicios.read().await.clone();
            rows.sort_by(|a, b| (a.servicio_id, &a.name).cmp(&(b.servicio_id, &b.name)));
            Ok(rows)
        }

        async fn create_servicio(&self, input: NewServicio) -> Result<Servicio, ServiceError> {
            let now = Utc::now();
            let row = Servicio {
                id: Uuid::new_v4(),
                name: input.name.trim().to_string(),
                description: input.description,
                price_cents: input.price_cents,
                active: input.active,
                created_at: now,
                updated_at: now,
            };
            self.servicios.write().await.push(row.clone());
            Ok(row)
        }

        async fn update_servicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Servicio, ServiceError> {
            let mut rows = self.servicios.write().await;
            let row = rows.iter_mut().find(|s| s.id == id).ok_or_else(|| ServiceError::not_found("servicio"))?;
            apply(&mut row.name, &mut row.description, &mut row.price_cents, &mut row.active, changes);
            row.updated_at = Utc::now();
            Ok(row.clone())
        }

        async fn delete_servicio(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.servicios.write().await;
            let before = rows.len();
            rows.retain(|s| s.id != id);
            let removed = rows.len() != before;
            if removed {
                self.subservicios.write().await.retain(|s| s.servicio_id != id);
            }
            Ok(removed)
        }

        async fn create_subservicio(&self, input: NewSubservicio) -> Result<Subservicio, ServiceError> {
            if !self.servicios.read().await.iter().any(|s| s.id == input.servicio_id) {
                return Err(ServiceError::not_found("servicio"));
            }
            let now = Utc::now();
            let row = Subservicio {
                id: Uuid::new_v4(),
                servicio_id: input.servicio_id,
                name: input.name.trim().to_string(),
                description: input.description,
                price_cents: input.price_cents,
                active: input.active,
                created_at: now,
                updated_at: now,
            };
            self.subservicios.write().await.push(row.clone());
            Ok(row)
        }

        async fn update_subservicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Subservicio, ServiceError> {
            let mut rows = self.subservicios.write().await;
            let row = rows.iter_mut().find(|s| s.id == id).ok_or_else(|| ServiceError::not_found("subservicio"))?;
            apply(&mut row.name, &mut row.description, &mut row.price_cents, &mut row.active, changes);
            row.updated_at = Utc::now();
            Ok(row.clone())
        }

        async fn delete_subservicio(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.subservicios.write().await;
            let before = rows.len();
            rows.retain(|s| s.id != id);
            Ok(rows.len() != before)
        }
    }
}
