use crate::ActivityLog;

#[test]
fn test_activity_log_new_leaves_optional_fields_empty() {
    let log = ActivityLog::new(3, 42, "admin", "login");

    assert_eq!(log.tenant_id, 3);
    assert_eq!(log.actor_id, 42);
    assert_eq!(log.role, "admin");
    assert_eq!(log.action, "login");
    assert!(log.entity_type.is_none());
    assert!(log.entity_id.is_none());
    assert!(log.description.is_none());
    assert!(log.ip_address.is_none());
}

#[test]
fn test_activity_log_builders_set_fields() {
    let log = ActivityLog::new(3, 42, "teacher", "update")
        .with_entity("student", 77)
        .with_description("Updated guardian phone")
        .with_ip_address("10.0.0.5");

    assert_eq!(log.entity_type.as_deref(), Some("student"));
    assert_eq!(log.entity_id, Some(77));
    assert_eq!(log.description.as_deref(), Some("Updated guardian phone"));
    assert_eq!(log.ip_address.as_deref(), Some("10.0.0.5"));
}

#[test]
fn test_activity_log_ids_are_unique() {
    let a = ActivityLog::new(1, 1, "admin", "login");
    let b = ActivityLog::new(1, 1, "admin", "login");
    assert_ne!(a.id, b.id);
}
