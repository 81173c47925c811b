use crate::AuthContext;

use sm_core::TenantHierarchy;

use std::sync::Arc;

use log::warn;

/// Maps an authenticated context to the root tenant whose data it may touch.
#[derive(Clone)]
pub struct TenantScopeResolver {
    hierarchy: Arc<dyn TenantHierarchy>,
}

impl TenantScopeResolver {
    pub fn new(hierarchy: Arc<dyn TenantHierarchy>) -> Self {
        Self { hierarchy }
    }

    /// First id present of: context admin_id, context account_id, claims
    /// admin_id, claims account_id, claims id. Zero when none is.
    pub fn candidate_id(ctx: &AuthContext) -> i64 {
        ctx.admin_id
            .or(ctx.account_id)
            .or(ctx.claims.admin_id)
            .or(ctx.claims.account_id)
            .or(ctx.claims.id)
            .unwrap_or(0)
    }

    pub async fn resolve_tenant_id(&self, ctx: &AuthContext) -> i64 {
        let candidate_id = Self::candidate_id(ctx);

        let through_hierarchy = ctx
            .parsed_role()
            .is_some_and(|role| role.resolves_through_hierarchy());
        if !through_hierarchy {
            return candidate_id;
        }

        match self.hierarchy.root_tenant_id(candidate_id).await {
            Ok(root_id) => root_id,
            Err(e) => {
                // Scope to the candidate rather than lock every admin out on a store hiccup.
                warn!("Tenant hierarchy lookup failed, scoping to candidate id: {e}");
                candidate_id
            }
        }
    }
}
