use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use super::{PageGuard, PageOutcome};
use crate::cache::{routes, ViewCache};
use crate::catalog::repository::CatalogRepository;
use crate::catalog::{CatalogFilter, CatalogService, Servicio, Subservicio};
use crate::errors::ServiceError;

/// Both catalog collections as last read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub servicios: Vec<Servicio>,
    pub subservicios: Vec<Subservicio>,
}

/// Data for the servicios dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiciosPage {
    pub user_id: Uuid,
    pub query: Option<String>,
    pub servicios: Vec<Servicio>,
    pub subservicios: Vec<Subservicio>,
}

/// Load the servicios page for the caller.
///
/// Redirects before touching the catalog when there is no session. The
/// two collections are read concurrently and cached under
/// [`routes::SERVICIOS`] until a catalog mutation invalidates it.
#[instrument(skip_all, fields(query = ?filter.query))]
pub async fn load<R: CatalogRepository + ?Sized>(
    guard: &PageGuard,
    catalog: &CatalogService<R>,
    views: &ViewCache<CatalogView>,
    token: Option<&str>,
    filter: &CatalogFilter,
) -> Result<PageOutcome<ServiciosPage>, ServiceError> {
    let session = match guard.session(token).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let view = views
        .get_or_load(routes::SERVICIOS, move || async move {
            let (servicios, subservicios) = tokio::try_join!(catalog.list_servicios(), catalog.list_subservicios())?;
            Ok::<_, ServiceError>(CatalogView { servicios, subservicios })
        })
        .await?;
    let (servicios, subservicios) = filter.apply(&view.servicios, &view.subservicios);
    Ok(PageOutcome::Render(ServiciosPage {
        user_id: session.user_id,
        query: filter.needle(),
        servicios,
        subservicios,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::auth::provider::mock::StaticAuthProvider;
    use crate::cache::CacheInvalidator;
    use crate::catalog::domain::{NewServicio, NewSubservicio};
    use crate::catalog::repository::mock::MockCatalogRepository;

    struct Fixture {
        repo: Arc<MockCatalogRepository>,
        catalog: CatalogService<MockCatalogRepository>,
        views: ViewCache<CatalogView>,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(MockCatalogRepository::default());
        let catalog = CatalogService::new(repo.clone());
        let lavado = catalog
            .create_servicio(NewServicio { name: "Lavado".into(), description: None, price_cents: 1000, active: true })
            .await
            .unwrap();
        catalog
            .create_servicio(NewServicio { name: "Pintura".into(), description: None, price_cents: 5000, active: true })
            .await
            .unwrap();
        catalog
            .create_subservicio(NewSubservicio { servicio_id: lavado.id, name: "Encerado".into(), description: None, price_cents: 300, active: true })
            .await
            .unwrap();
        Fixture { repo, catalog, views: ViewCache::new(8, Duration::from_secs(60)) }
    }

    #[tokio::test]
    async fn no_session_redirects_without_fetching() {
        let f = fixture().await;
        let guard = PageGuard::new(Arc::new(StaticAuthProvider::signed_out()), "/login");
        let out = load(&guard, &f.catalog, &f.views, None, &CatalogFilter::default()).await.unwrap();
        assert_eq!(out, PageOutcome::Redirect("/login".into()));
        assert_eq!(f.repo.list_calls(), 0);
    }

    #[tokio::test]
    async fn renders_both_collections_and_caches_them() {
        let f = fixture().await;
        let user = Uuid::new_v4();
        let guard = PageGuard::new(Arc::new(StaticAuthProvider::signed_in(user)), "/login");
        let PageOutcome::Render(page) = load(&guard, &f.catalog, &f.views, Some("t"), &CatalogFilter::default()).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(page.user_id, user);
        assert_eq!(page.servicios.len(), 2);
        assert_eq!(page.subservicios.len(), 1);
        assert_eq!(f.repo.list_calls(), 2);

        load(&guard, &f.catalog, &f.views, Some("t"), &CatalogFilter::default()).await.unwrap();
        assert_eq!(f.repo.list_calls(), 2);

        f.views.invalidate(routes::SERVICIOS).await;
        load(&guard, &f.catalog, &f.views, Some("t"), &CatalogFilter::default()).await.unwrap();
        assert_eq!(f.repo.list_calls(), 4);
    }

    #[tokio::test]
    async fn search_filters_the_cached_view() {
        let f = fixture().await;
        let guard = PageGuard::new(Arc::new(StaticAuthProvider::signed_in(Uuid::new_v4())), "/login");
        let out = load(&guard, &f.catalog, &f.views, Some("t"), &CatalogFilter::new(" pint ")).await.unwrap();
        let PageOutcome::Render(page) = out else { panic!("expected render") };
        assert_eq!(page.query.as_deref(), Some("pint"));
        assert_eq!(page.servicios.len(), 1);
        assert!(page.subservicios.is_empty());
        // the unfiltered view is what got cached
        assert_eq!(f.views.get(routes::SERVICIOS).await.unwrap().servicios.len(), 2);
    }
}
