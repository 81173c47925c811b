use crate::ActivityRecorder;

use sm_auth::{AuthGate, TenantScopeResolver, TokenCodec};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_gate: AuthGate,
    pub resolver: TenantScopeResolver,
    pub recorder: ActivityRecorder,
    /// Include decode errors in generic 401 bodies
    pub auth_debug: bool,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        codec: Arc<TokenCodec>,
        resolver: TenantScopeResolver,
        auth_debug: bool,
    ) -> Self {
        Self {
            recorder: ActivityRecorder::new(pool.clone()),
            auth_gate: AuthGate::new(codec),
            pool,
            resolver,
            auth_debug,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        self.auth_gate.codec()
    }
}
