use serde::{Deserialize, Serialize};

/// A login identity. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    /// Tenant the account belongs to, for roles scoped directly by id
    pub account_id: Option<i64>,
    /// Admin row the account administers or is owned by
    pub admin_id: Option<i64>,
    pub active: bool,
}
