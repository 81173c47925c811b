use crate::Result as DbErrorResult;

use sm_core::Account;

use sqlx::FromRow;

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    account_id: Option<i64>,
    admin_id: Option<i64>,
    active: bool,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            account_id: row.account_id,
            admin_id: row.admin_id,
            active: row.active,
        }
    }
}

pub struct AccountRepository;

impl AccountRepository {
    /// Case-insensitive lookup by email
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> DbErrorResult<Option<Account>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
              SELECT id, email, password_hash, role, account_id, admin_id, active
              FROM accounts
              WHERE email = ?
              "#,
        )
        .bind(email.trim())
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Account::from))
    }

    /// Insert an account and return its id. `account.id` is ignored.
    pub async fn create<'e, E>(executor: E, account: &Account) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
              INSERT INTO accounts (
                  email, password_hash, role, account_id, admin_id, active, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(account.email.trim())
        .bind(&account.password_hash)
        .bind(&account.role)
        .bind(account.account_id)
        .bind(account.admin_id)
        .bind(account.active)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
