use crate::{CoreError, Role};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::SubAdmin.as_str(), "sub_admin");
    assert_eq!(Role::SuperAdmin.as_str(), "super_admin");
    assert_eq!(Role::Parent.as_str(), "parent");
}

#[test]
fn test_role_from_str_is_case_insensitive() {
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("Principal").unwrap(), Role::Principal);
    assert_eq!(Role::from_str("Super_Admin").unwrap(), Role::SuperAdmin);
}

#[test]
fn test_role_from_str_rejects_near_misses() {
    assert!(Role::from_str("super-admin").is_err());
    assert!(Role::from_str("sub-admin").is_err());
    assert!(Role::from_str(" admin").is_err());
    assert!(Role::from_str("teacher ").is_err());
}

#[test]
fn test_role_from_str_rejects_unknown() {
    let result = Role::from_str("janitor");
    assert!(matches!(result, Err(CoreError::InvalidRole { ref value, .. }) if value == "janitor"));
}

#[test]
fn test_only_admin_like_roles_resolve_through_hierarchy() {
    assert!(Role::Admin.resolves_through_hierarchy());
    assert!(Role::Principal.resolves_through_hierarchy());
    assert!(Role::SuperAdmin.resolves_through_hierarchy());

    assert!(!Role::SubAdmin.resolves_through_hierarchy());
    assert!(!Role::Teacher.resolves_through_hierarchy());
    assert!(!Role::Student.resolves_through_hierarchy());
    assert!(!Role::Parent.resolves_through_hierarchy());
}

#[test]
fn test_role_display_matches_as_str() {
    assert_eq!(Role::SuperAdmin.to_string(), "super_admin");
}
