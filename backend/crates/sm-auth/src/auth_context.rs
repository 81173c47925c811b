use crate::Claims;

use sm_core::{ActivityLog, Role};

use std::str::FromStr;

use serde::Serialize;

/// Validated identity attached to a request after the auth gate.
///
/// Lives only for the request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub claims: Claims,
    pub account_id: Option<i64>,
    pub admin_id: Option<i64>,
    /// Role exactly as the token spelled it
    pub role: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        let account_id = match claims.account_id {
            Some(account_id) => Some(account_id),
            None => claims.id,
        };

        let admin_id = match claims.admin_id {
            Some(admin_id) => Some(admin_id),
            // Admin tokens issued before admin_id existed: the admin owns itself.
            None if matches!(Role::from_str(&claims.role), Ok(Role::Admin)) => claims.id,
            None => None,
        };

        Self {
            role: claims.role.clone(),
            account_id,
            admin_id,
            claims,
        }
    }

    /// Parsed role, `None` when the token carries a role this server doesn't know.
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_str(&self.role).ok()
    }

    /// Id of the account acting on this request.
    pub fn actor_id(&self) -> i64 {
        self.claims.id.or(self.account_id).unwrap_or(0)
    }

    /// Start an audit entry for an action taken under this context.
    pub fn activity(&self, tenant_id: i64, action: impl Into<String>) -> ActivityLog {
        ActivityLog::new(tenant_id, self.actor_id(), self.role.clone(), action)
    }
}
