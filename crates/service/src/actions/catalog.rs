use uuid::Uuid;

use crate::cache::routes;
use crate::catalog::domain::{CatalogChanges, NewServicio, NewSubservicio};
use crate::catalog::repository::CatalogRepository;
use crate::catalog::{CatalogService, Servicio, Subservicio};
use crate::envelope::ActionResult;
use crate::mutation::MutationContext;

const AFFECTED: &[&str] = &[routes::SERVICIOS];

pub async fn create_servicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    input: NewServicio,
) -> ActionResult<Servicio> {
    ctx.run("create_servicio", token, AFFECTED, move |_| async move { catalog.create_servicio(input).await })
        .await
}

pub async fn update_servicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    id: Uuid,
    changes: CatalogChanges,
) -> ActionResult<Servicio> {
    ctx.run("update_servicio", token, AFFECTED, move |_| async move { catalog.update_servicio(id, changes).await })
        .await
}

/// Returns the id of the deleted servicio.
pub async fn delete_servicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    id: Uuid,
) -> ActionResult<Uuid> {
    ctx.run("delete_servicio", token, AFFECTED, move |_| async move { catalog.delete_servicio(id).await })
        .await
}

pub async fn create_subservicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    input: NewSubservicio,
) -> ActionResult<Subservicio> {
    ctx.run("create_subservicio", token, AFFECTED, move |_| async move { catalog.create_subservicio(input).await })
        .await
}

pub async fn update_subservicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    id: Uuid,
    changes: CatalogChanges,
) -> ActionResult<Subservicio> {
    ctx.run("update_subservicio", token, AFFECTED, move |_| async move { catalog.update_subservicio(id, changes).await })
        .await
}

pub async fn delete_subservicio<R: CatalogRepository + ?Sized>(
    ctx: &MutationContext,
    catalog: &CatalogService<R>,
    token: Option<&str>,
    id: Uuid,
) -> ActionResult<Uuid> {
    ctx.run("delete_subservicio", token, AFFECTED, move |_| async move { catalog.delete_subservicio(id).await })
        .await
}
