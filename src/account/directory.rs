//! Account directory trait and implementations.
//!
//! The directory is the storage seam of the core: a keyed store of account
//! records looked up by id, unique username, or unique email. The core only
//! depends on the trait; persistence mechanics live in the implementations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;

use super::models::{Account, AccountId};
use crate::auth::{AuthError, AuthResult};

/// Trait for account storage operations
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>>;

    /// Find account by unique email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Find account by unique username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>>;

    /// Insert a new account with an already-hashed password
    ///
    /// # Errors
    ///
    /// * `AuthError::AccountConflict` - Username or email already in use
    async fn insert(&self, username: &str, email: &str, password_hash: &str)
    -> AuthResult<Account>;

    /// Overwrite an existing account record (last-write-wins)
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - No account with this id
    /// * `AuthError::AccountConflict` - Username or email already in use
    async fn update(&self, account: &Account) -> AuthResult<()>;
}

/// Default PostgreSQL implementation of `AccountDirectory`
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Account {
    Account {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        avatar: row.get("avatar"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

/// Map unique-constraint violations to the conflict error; pass the rest through
fn map_constraint_error(error: sqlx::Error) -> AuthError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::AccountConflict,
        _ => AuthError::Database(error),
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, avatar, created_at
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_account))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, avatar, created_at
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_account))
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, avatar, created_at
             FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_account))
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<Account> {
        let row = sqlx::query(
            "INSERT INTO accounts (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash, avatar, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(row_to_account(&row))
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        let result = sqlx::query(
            "UPDATE accounts
             SET username = $2, email = $3, password_hash = $4, avatar = $5
             WHERE id = $1",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.avatar)
        .execute(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}

/// In-memory implementation of `AccountDirectory` for tests and examples
#[derive(Default)]
pub struct MemoryAccountDirectory {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: AccountId,
    accounts: HashMap<AccountId, Account>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<Account> {
        let mut inner = self.inner.lock().unwrap();
        let taken = inner
            .accounts
            .values()
            .any(|a| a.username == username || a.email == email);
        if taken {
            return Err(AuthError::AccountConflict);
        }

        inner.next_id += 1;
        let account = Account {
            id: inner.next_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            avatar: None,
            created_at: Utc::now(),
        };
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.accounts.contains_key(&account.id) {
            return Err(AuthError::NotFound);
        }
        let taken = inner.accounts.values().any(|a| {
            a.id != account.id && (a.username == account.username || a.email == account.email)
        });
        if taken {
            return Err(AuthError::AccountConflict);
        }
        inner.accounts.insert(account.id, account.clone());
        Ok(())
    }
}
