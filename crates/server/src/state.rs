use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::auth::{AuthProvider, JwtAuthProvider};
use service::cache::{CacheInvalidator, ViewCache};
use service::catalog::repository::{CatalogRepository, SeaOrmCatalogRepository};
use service::catalog::CatalogService;
use service::pages::servicios::CatalogView;
use service::pages::PageGuard;
use service::profile::repository::{ProfileRepository, SeaOrmProfileRepository};
use service::profile::ProfileService;
use service::MutationContext;

/// Storage backends the handlers run against.
#[derive(Clone)]
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            auth: Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            profiles: Arc::new(SeaOrmProfileRepository { db: db.clone() }),
            catalog: Arc::new(SeaOrmCatalogRepository { db }),
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub mutations: MutationContext,
    pub pages: PageGuard,
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub profiles: Arc<ProfileService<dyn ProfileRepository>>,
    pub catalog: Arc<CatalogService<dyn CatalogRepository>>,
    pub views: Arc<ViewCache<CatalogView>>,
    pub secure_cookies: bool,
}

impl ServerState {
    pub fn new(cfg: &AppConfig, repos: Repositories) -> Self {
        let provider: Arc<dyn AuthProvider> = Arc::new(JwtAuthProvider::new(&cfg.auth.jwt_secret));
        let views = Arc::new(ViewCache::new(cfg.cache.max_capacity, Duration::from_secs(cfg.cache.ttl_secs)));
        let invalidator: Arc<dyn CacheInvalidator> = views.clone();

        let auth_cfg = AuthConfig {
            token_ttl: chrono::Duration::hours(cfg.auth.token_ttl_hours),
            ..AuthConfig::new(cfg.auth.jwt_secret.clone())
        };

        Self {
            mutations: MutationContext::new(provider.clone(), invalidator),
            pages: PageGuard::new(provider, cfg.auth.login_path.clone()),
            auth: Arc::new(AuthService::new(repos.auth, auth_cfg)),
            profiles: Arc::new(ProfileService::new(repos.profiles)),
            catalog: Arc::new(CatalogService::new(repos.catalog)),
            views,
            secure_cookies: cfg.auth.secure_cookies,
        }
    }
}
