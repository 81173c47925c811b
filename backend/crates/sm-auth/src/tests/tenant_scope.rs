use crate::{AuthContext, Claims, TenantScopeResolver};

use sm_core::{CoreError, ErrorLocation, Result as CoreErrorResult, TenantHierarchy};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use googletest::prelude::*;

/// In-memory hierarchy: child id -> root id. Unknown ids are their own root.
#[derive(Default)]
struct FakeHierarchy {
    roots: Mutex<HashMap<i64, i64>>,
    lookups: AtomicUsize,
}

impl FakeHierarchy {
    fn with_root(self, child: i64, root: i64) -> Self {
        self.roots.lock().unwrap().insert(child, root);
        self
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantHierarchy for FakeHierarchy {
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let roots = self.roots.lock().unwrap();
        Ok(roots.get(&candidate_id).copied().unwrap_or(candidate_id))
    }
}

struct BrokenHierarchy;

#[async_trait]
impl TenantHierarchy for BrokenHierarchy {
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64> {
        Err(CoreError::TenantLookup {
            candidate_id,
            message: "database is locked".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn context(id: Option<i64>, account_id: Option<i64>, admin_id: Option<i64>, role: &str) -> AuthContext {
    AuthContext::from_claims(Claims {
        id,
        account_id,
        admin_id,
        role: role.to_string(),
        email: None,
        iat: 0,
        exp: i64::MAX,
    })
}

#[tokio::test]
async fn given_teacher_with_account_id_when_resolved_then_returns_account_id_without_lookup() {
    // Given
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(7, 1));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(300), Some(7), None, "teacher");

    // When
    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    // Then
    assert_that!(tenant_id, eq(7));
    assert_that!(hierarchy.lookups(), eq(0));
}

#[tokio::test]
async fn given_principal_when_resolved_then_returns_owning_admin() {
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(12, 3));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(12), None, None, "Principal");

    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(tenant_id, eq(3));
    assert_that!(hierarchy.lookups(), eq(1));
}

#[tokio::test]
async fn given_root_admin_when_resolved_then_returns_itself() {
    let hierarchy = Arc::new(FakeHierarchy::default());
    let resolver = TenantScopeResolver::new(hierarchy);
    let ctx = context(Some(3), None, None, "admin");

    let first = resolver.resolve_tenant_id(&ctx).await;
    let second = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(first, eq(3));
    assert_that!(second, eq(3));
}

#[tokio::test]
async fn given_sub_admin_when_resolved_then_scoped_by_token_admin_id() {
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(3, 99));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(20), None, Some(3), "sub_admin");

    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(tenant_id, eq(3));
    assert_that!(hierarchy.lookups(), eq(0));
}

#[tokio::test]
async fn given_unknown_role_when_resolved_then_returns_candidate() {
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(5, 1));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(5), None, None, "janitor");

    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(tenant_id, eq(5));
    assert_that!(hierarchy.lookups(), eq(0));
}

#[tokio::test]
async fn given_hyphenated_super_admin_when_resolved_then_returns_candidate_without_lookup() {
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(8, 1));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(12), None, Some(8), "super-admin");

    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(tenant_id, eq(8));
    assert_that!(hierarchy.lookups(), eq(0));
}

#[tokio::test]
async fn given_padded_admin_role_when_resolved_then_returns_candidate_without_lookup() {
    // Given: " admin" is not "admin", so no backfill and no hierarchy
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(42, 1));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(42), None, None, " admin");

    // When
    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    // Then
    assert_that!(ctx.admin_id, none());
    assert_that!(tenant_id, eq(42));
    assert_that!(hierarchy.lookups(), eq(0));
}

#[tokio::test]
async fn given_failing_store_when_resolving_admin_then_falls_back_to_candidate() {
    let resolver = TenantScopeResolver::new(Arc::new(BrokenHierarchy));
    let ctx = context(Some(12), None, Some(8), "super_admin");

    let tenant_id = resolver.resolve_tenant_id(&ctx).await;

    assert_that!(tenant_id, eq(8));
}

#[tokio::test]
async fn given_store_changes_between_calls_when_resolved_then_each_call_sees_current_state() {
    // Given
    let hierarchy = Arc::new(FakeHierarchy::default().with_root(12, 3));
    let resolver = TenantScopeResolver::new(hierarchy.clone());
    let ctx = context(Some(12), None, None, "principal");
    let before = resolver.resolve_tenant_id(&ctx).await;

    // When: principal moved to another school
    hierarchy.roots.lock().unwrap().insert(12, 4);
    let after = resolver.resolve_tenant_id(&ctx).await;

    // Then
    assert_that!(before, eq(3));
    assert_that!(after, eq(4));
    assert_that!(hierarchy.lookups(), eq(2));
}

#[test]
fn given_context_fields_when_candidate_chosen_then_precedence_is_respected() {
    // context admin_id wins
    assert_that!(
        TenantScopeResolver::candidate_id(&context(Some(1), Some(2), Some(3), "teacher")),
        eq(3)
    );
    // then context account_id (account_id over id)
    assert_that!(
        TenantScopeResolver::candidate_id(&context(Some(1), Some(2), None, "teacher")),
        eq(2)
    );
    // then id, through the account_id fallback
    assert_that!(
        TenantScopeResolver::candidate_id(&context(Some(1), None, None, "parent")),
        eq(1)
    );
}

#[test]
fn given_no_ids_when_candidate_chosen_then_zero() {
    let ctx = context(None, None, None, "student");

    assert_that!(TenantScopeResolver::candidate_id(&ctx), eq(0));
}
