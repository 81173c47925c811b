use sm_auth::Claims;

use serde::Serialize;

/// The caller's session as the server sees it
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub account_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub role: String,
    pub tenant_id: i64,
    pub claims: Claims,
}
