#![allow(dead_code)]

//! Test infrastructure for sm-server API tests

use sm_auth::{Identity, TenantScopeResolver, TokenCodec};
use sm_core::{Account, ActivityLog};
use sm_db::{AccountRepository, ActivityLogRepository, TenantHierarchyRepository};
use sm_server::AppState;

use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";
pub const OTHER_SECRET: &[u8] = b"some-other-server-secret-0123456789abcdef";
pub const TTL: Duration = Duration::from_secs(3600);

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sm_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::with_hs256(SECRET, TTL))
}

/// AppState over an in-memory database, uncached hierarchy, debug off
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with_debug(false).await
}

pub async fn create_test_app_state_with_debug(auth_debug: bool) -> AppState {
    let pool = create_test_pool().await;
    let resolver = TenantScopeResolver::new(Arc::new(TenantHierarchyRepository::new(pool.clone())));
    AppState::new(pool, codec(), resolver, auth_debug)
}

pub fn bearer(state: &AppState, identity: Identity) -> String {
    let issued = state.codec().issue(identity).expect("Failed to issue token");
    format!("Bearer {}", issued.token)
}

pub fn admin_identity(id: i64) -> Identity {
    Identity {
        id: Some(id),
        role: "admin".to_string(),
        ..Identity::default()
    }
}

pub fn hash_password(password: &str) -> String {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes()).expect("Invalid salt");
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash password")
        .to_string()
}

/// Insert an admin row; `None` parent makes it a tenant root
pub async fn create_test_admin(pool: &SqlitePool, name: &str, role: &str, parent: Option<i64>) -> i64 {
    TenantHierarchyRepository::new(pool.clone())
        .create_admin(name, role, parent)
        .await
        .expect("Failed to create admin")
}

pub async fn create_test_account(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    role: &str,
    account_id: Option<i64>,
    admin_id: Option<i64>,
) -> i64 {
    let account = Account {
        id: 0,
        email: email.to_string(),
        password_hash: hash_password(password),
        role: role.to_string(),
        account_id,
        admin_id,
        active: true,
    };

    AccountRepository::create(pool, &account)
        .await
        .expect("Failed to create account")
}

pub async fn insert_activity(pool: &SqlitePool, entry: &ActivityLog) {
    ActivityLogRepository::create(pool, entry)
        .await
        .expect("Failed to insert activity");
}

/// Activity rows are written in the background; poll until `expected` land.
pub async fn wait_for_activity(pool: &SqlitePool, tenant_id: i64, expected: usize) -> Vec<ActivityLog> {
    for _ in 0..100 {
        let logs = ActivityLogRepository::find_by_tenant(pool, tenant_id, 100)
            .await
            .expect("Failed to read activity");
        if logs.len() >= expected {
            return logs;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} activity entries for tenant {tenant_id}");
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, authorization: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send one request and decode the JSON body (`Null` for non-JSON bodies)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
