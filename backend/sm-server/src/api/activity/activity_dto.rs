use sm_core::ActivityLog;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityDto {
    pub id: String,
    pub actor_id: i64,
    pub role: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// RFC 3339
    pub created_at: String,
}

impl From<ActivityLog> for ActivityDto {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id.to_string(),
            actor_id: log.actor_id,
            role: log.role,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            description: log.description,
            ip_address: log.ip_address,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}
