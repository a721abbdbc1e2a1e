use std::sync::Arc;

use models::validation::{validate_name, validate_price};
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CatalogChanges, NewServicio, NewSubservicio, Servicio, Subservicio};
use super::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Application service encapsulating catalog business rules.
/// Validates input before it reaches the repository.
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repo: Arc<R>,
}

fn validate_changes(changes: &CatalogChanges) -> Result<(), ServiceError> {
    if changes.is_empty() {
        return Err(ServiceError::Validation("no changes supplied".into()));
    }
    if let Some(name) = &changes.name {
        validate_name(name)?;
    }
    if let Some(price) = changes.price_cents {
        validate_price(price)?;
    }
    Ok(())
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_servicios(&self) -> Result<Vec<Servicio>, ServiceError> {
        self.repo.list_servicios().await
    }

    pub async fn list_subservicios(&self) -> Result<Vec<Subservicio>, ServiceError> {
        self.repo.list_subservicios().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_servicio(&self, input: NewServicio) -> Result<Servicio, ServiceError> {
        validate_name(&input.name)?;
        validate_price(input.price_cents)?;
        let created = self.repo.create_servicio(input).await?;
        info!(servicio_id = %created.id, "servicio_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(servicio_id = %id))]
    pub async fn update_servicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Servicio, ServiceError> {
        validate_changes(&changes)?;
        self.repo.update_servicio(id, changes).await
    }

    /// Deletes the servicio and, through the FK, its subservicios.
    #[instrument(skip(self), fields(servicio_id = %id))]
    pub async fn delete_servicio(&self, id: Uuid) -> Result<Uuid, ServiceError> {
        if !self.repo.delete_servicio(id).await? {
            return Err(ServiceError::not_found("servicio"));
        }
        info!("servicio_deleted");
        Ok(id)
    }

    #[instrument(skip(self, input), fields(servicio_id = %input.servicio_id, name = %input.name))]
    pub async fn create_subservicio(&self, input: NewSubservicio) -> Result<Subservicio, ServiceError> {
        validate_name(&input.name)?;
        validate_price(input.price_cents)?;
        let created = self.repo.create_subservicio(input).await?;
        info!(subservicio_id = %created.id, "subservicio_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(subservicio_id = %id))]
    pub async fn update_subservicio(&self, id: Uuid, changes: CatalogChanges) -> Result<Subservicio, ServiceError> {
        validate_changes(&changes)?;
        self.repo.update_subservicio(id, changes).await
    }

    #[instrument(skip(self), fields(subservicio_id = %id))]
    pub async fn delete_subservicio(&self, id: Uuid) -> Result<Uuid, ServiceError> {
        if !self.repo.delete_subservicio(id).await? {
            return Err(ServiceError::not_found("subservicio"));
        }
        info!("subservicio_deleted");
        Ok(id)
    }
}
