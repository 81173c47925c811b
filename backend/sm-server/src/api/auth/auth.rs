use crate::{
    ApiError, ApiResult, AppState, Authenticated, ClientIp, LoginRequest, LoginResponse,
    MeResponse, SuccessResponse,
};

use sm_auth::{AuthContext, Identity};
use sm_core::Account;
use sm_db::AccountRepository;

use std::panic::Location;
use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{Json, extract::State};
use error_location::ErrorLocation;
use log::{info, warn};

/// Checked in place of a real hash when no active account matches the email,
/// so every login attempt pays for one Argon2 verification.
static DUMMY_PASSWORD_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::encode_b64(b"sm-login-placeholder").ok()?;
    Argon2::default()
        .hash_password(b"placeholder-password", &salt)
        .ok()
        .map(|hash| hash.to_string())
});

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = req.email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required", "email"));
    }
    if req.password.is_empty() {
        return Err(ApiError::validation("Password is required", "password"));
    }

    let account = AccountRepository::find_by_email(&state.pool, email)
        .await?
        .filter(|account| account.active);

    let verified = verify_password(account.as_ref(), req.password).await?;
    let Some(account) = account.filter(|_| verified) else {
        return Err(ApiError::invalid_credentials());
    };

    let issued = state.codec().issue(identity_for(&account))?;
    let ctx = AuthContext::from_claims(issued.claims.clone());
    let tenant_id = state.resolver.resolve_tenant_id(&ctx).await;

    let mut entry = ctx
        .activity(tenant_id, "login")
        .with_entity("account", account.id);
    if let Some(ip) = ip {
        entry = entry.with_ip_address(ip);
    }
    state.recorder.record(entry);

    info!("Account {} logged in (tenant {})", account.id, tenant_id);

    Ok(Json(LoginResponse {
        success: true,
        expires_at: issued.expires_at(),
        token: issued.token,
        role: account.role,
        tenant_id,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> ApiResult<Json<MeResponse>> {
    let tenant_id = state.resolver.resolve_tenant_id(&ctx).await;

    Ok(Json(MeResponse {
        success: true,
        account_id: ctx.account_id,
        admin_id: ctx.admin_id,
        role: ctx.role,
        tenant_id,
        claims: ctx.claims,
    }))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; this only leaves an audit entry.
pub async fn logout(
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
    ClientIp(ip): ClientIp,
) -> ApiResult<Json<SuccessResponse>> {
    let tenant_id = state.resolver.resolve_tenant_id(&ctx).await;

    let mut entry = ctx.activity(tenant_id, "logout");
    if let Some(ip) = ip {
        entry = entry.with_ip_address(ip);
    }
    state.recorder.record(entry);

    Ok(Json(SuccessResponse::ok()))
}

fn identity_for(account: &Account) -> Identity {
    Identity {
        id: Some(account.id),
        account_id: account.account_id,
        admin_id: account.admin_id,
        role: account.role.clone(),
        email: Some(account.email.clone()),
    }
}

/// Runs the Argon2 check on the blocking pool.
///
/// Without an account the placeholder hash is verified and the result is
/// always `false`.
pub(crate) async fn verify_password(account: Option<&Account>, password: String) -> ApiResult<bool> {
    let account_id = account.map(|account| account.id);
    let stored_hash = account.map(|account| account.password_hash.clone());

    tokio::task::spawn_blocking(move || {
        let Some(hash) = stored_hash.as_deref().or(DUMMY_PASSWORD_HASH.as_deref()) else {
            return false;
        };

        let verified = match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!("Account {:?} has an unreadable password hash: {}", account_id, e);
                false
            }
        };

        verified && account_id.is_some()
    })
    .await
    .map_err(|e| ApiError::Internal {
        message: format!("Password check failed: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
