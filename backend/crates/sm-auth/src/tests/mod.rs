mod tenant_scope;

use crate::{Identity, TokenCodec};

use std::time::Duration;

pub(crate) const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const TTL: Duration = Duration::from_secs(3600);

pub(crate) fn codec() -> TokenCodec {
    TokenCodec::with_hs256(SECRET, TTL)
}

pub(crate) fn admin_identity(id: i64) -> Identity {
    Identity {
        id: Some(id),
        account_id: None,
        admin_id: None,
        role: "admin".to_string(),
        email: Some(format!("admin{id}@school.test")),
    }
}

pub(crate) fn teacher_identity(id: i64, account_id: i64) -> Identity {
    Identity {
        id: Some(id),
        account_id: Some(account_id),
        admin_id: None,
        role: "teacher".to_string(),
        email: None,
    }
}
