use crate::Result as CoreErrorResult;

use std::sync::Arc;

use async_trait::async_trait;

/// Read-only view of the admin delegation chain.
///
/// Implementations must be idempotent: passing an id that is already a root
/// returns that id.
#[async_trait]
pub trait TenantHierarchy: Send + Sync {
    /// Walk `candidate_id` up to the admin at the top of its chain.
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64>;
}

#[async_trait]
impl<T: TenantHierarchy + ?Sized> TenantHierarchy for Arc<T> {
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64> {
        (**self).root_tenant_id(candidate_id).await
    }
}
