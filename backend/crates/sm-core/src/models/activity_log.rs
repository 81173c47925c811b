use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audited action performed by an authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,

    /// Root tenant the action belongs to
    pub tenant_id: i64,
    pub actor_id: i64,
    pub role: String,

    pub action: String,

    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub description: Option<String>,
    pub ip_address: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        tenant_id: i64,
        actor_id: i64,
        role: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            actor_id,
            role: role.into(),
            action: action.into(),
            entity_type: None,
            entity_id: None,
            description: None,
            ip_address: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: i64) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}
