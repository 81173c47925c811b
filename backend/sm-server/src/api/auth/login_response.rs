use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub role: String,
    pub tenant_id: i64,
}
