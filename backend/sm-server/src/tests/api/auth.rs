use crate::api::auth::auth::verify_password;

use sm_core::Account;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use googletest::prelude::*;

fn account_with_password(password: &str) -> Account {
    let salt = SaltString::encode_b64(b"unit-test-salt-16").unwrap();
    Account {
        id: 11,
        email: "bursar@school.test".to_string(),
        password_hash: Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string(),
        role: "admin".to_string(),
        account_id: None,
        admin_id: Some(11),
        active: true,
    }
}

#[tokio::test]
async fn given_no_account_when_password_verified_then_false() {
    let verified = verify_password(None, "placeholder-password".to_string())
        .await
        .unwrap();

    assert_that!(verified, eq(false));
}

#[tokio::test]
async fn given_matching_password_when_verified_then_true() {
    let account = account_with_password("correct horse");

    let verified = verify_password(Some(&account), "correct horse".to_string())
        .await
        .unwrap();

    assert_that!(verified, eq(true));
}

#[tokio::test]
async fn given_wrong_password_when_verified_then_false() {
    let account = account_with_password("correct horse");

    let verified = verify_password(Some(&account), "battery staple".to_string())
        .await
        .unwrap();

    assert_that!(verified, eq(false));
}

#[tokio::test]
async fn given_unreadable_stored_hash_when_verified_then_false() {
    let mut account = account_with_password("correct horse");
    account.password_hash = "not-a-phc-string".to_string();

    let verified = verify_password(Some(&account), "correct horse".to_string())
        .await
        .unwrap();

    assert_that!(verified, eq(false));
}
