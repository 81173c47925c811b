use sm_cache::FileCache;
use sm_core::{Result as CoreErrorResult, TenantHierarchy};

use std::time::Duration;

use async_trait::async_trait;

/// Remembers hierarchy lookups in the file cache for `ttl`.
///
/// Failed lookups are not cached.
pub struct CachedTenantHierarchy<H> {
    inner: H,
    cache: FileCache,
    ttl: Duration,
}

impl<H: TenantHierarchy> CachedTenantHierarchy<H> {
    pub fn new(inner: H, cache: FileCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    fn cache_key(candidate_id: i64) -> String {
        format!("tenant-root:{candidate_id}")
    }
}

#[async_trait]
impl<H: TenantHierarchy> TenantHierarchy for CachedTenantHierarchy<H> {
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64> {
        self.cache
            .remember(&Self::cache_key(candidate_id), Some(self.ttl), || {
                self.inner.root_tenant_id(candidate_id)
            })
            .await
    }
}
