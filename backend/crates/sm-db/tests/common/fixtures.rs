#![allow(dead_code)]

use sm_core::{Account, ActivityLog};

use chrono::{Duration, Utc};

/// Creates an activity log entry `offset_secs` from now
pub fn create_test_activity_log_at(tenant_id: i64, action: &str, offset_secs: i64) -> ActivityLog {
    let mut log = ActivityLog::new(tenant_id, 42, "admin", action);
    log.created_at = Utc::now() + Duration::seconds(offset_secs);
    log
}

/// Creates an activity log entry with every optional field populated
pub fn create_detailed_activity_log(tenant_id: i64) -> ActivityLog {
    ActivityLog::new(tenant_id, 42, "teacher", "update")
        .with_entity("student", 77)
        .with_description("Changed guardian contact")
        .with_ip_address("192.168.1.20")
}

/// Creates an unsaved account
pub fn create_test_account(email: &str, role: &str, admin_id: Option<i64>) -> Account {
    Account {
        id: 0,
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA".to_string(),
        role: role.to_string(),
        account_id: None,
        admin_id,
        active: true,
    }
}
