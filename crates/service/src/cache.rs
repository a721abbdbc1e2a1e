//! Rendered-view cache and the invalidation hook mutations call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

/// Route identifiers of cached dashboard views.
pub mod routes {
    pub const SERVICIOS: &str = "/dashboard/servicios";
    pub const PERFIL: &str = "/dashboard/perfil";
}

/// Marks a view stale so the next page load recomputes it.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, route: &str);
}

/// Route-keyed cache of view data, shared by all requests.
pub struct ViewCache<V> {
    inner: Cache<String, Arc<V>>,
}

impl<V: Send + Sync + 'static> ViewCache<V> {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build();
        Self { inner }
    }

    pub async fn get(&self, route: &str) -> Option<Arc<V>> {
        self.inner.get(route).await
    }

    /// Cached value for `route`, or the result of `load` (stored on success).
    /// Failures are returned as-is and never cached.
    pub async fn get_or_load<F, Fut, E>(&self, route: &str, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.inner.get(route).await {
            debug!(%route, "view cache hit");
            return Ok(hit);
        }
        let value = Arc::new(load().await?);
        self.inner.insert(route.to_string(), Arc::clone(&value)).await;
        debug!(%route, "view cache filled");
        Ok(value)
    }

    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

#[async_trait]
impl<V: Send + Sync + 'static> CacheInvalidator for ViewCache<V> {
    async fn invalidate(&self, route: &str) {
        self.inner.invalidate(route).await;
        debug!(%route, "view invalidated");
    }
}

/// Records invalidated routes; for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingInvalidator {
        routes: Mutex<Vec<String>>,
    }

    impl RecordingInvalidator {
        pub async fn routes(&self) -> Vec<String> {
            self.routes.lock().await.clone()
        }
    }

    #[async_trait]
    impl CacheInvalidator for RecordingInvalidator {
        async fn invalidate(&self, route: &str) {
            self.routes.lock().await.push(route.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> ViewCache<u32> {
        ViewCache::new(16, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn loads_once_until_invalidated() {
        let cache = cache();
        let loads = AtomicUsize::new(0);
        let counter = &loads;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::convert::Infallible>(7)
        };
        assert_eq!(*cache.get_or_load(routes::SERVICIOS, load).await.unwrap(), 7);
        assert_eq!(*cache.get_or_load(routes::SERVICIOS, load).await.unwrap(), 7);
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.invalidate(routes::SERVICIOS).await;
        assert!(cache.get(routes::SERVICIOS).await.is_none());
        cache.get_or_load(routes::SERVICIOS, load).await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_loads_are_not_cached() {
        let cache = cache();
        let res = cache.get_or_load(routes::SERVICIOS, || async { Err::<u32, _>("down") }).await;
        assert_eq!(res.unwrap_err(), "down");
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn invalidating_one_route_keeps_others() {
        let cache = cache();
        cache.get_or_load(routes::SERVICIOS, || async { Ok::<_, ()>(1) }).await.unwrap();
        cache.get_or_load(routes::PERFIL, || async { Ok::<_, ()>(2) }).await.unwrap();
        cache.invalidate(routes::PERFIL).await;
        assert!(cache.get(routes::SERVICIOS).await.is_some());
        assert!(cache.get(routes::PERFIL).await.is_none());
    }
}
