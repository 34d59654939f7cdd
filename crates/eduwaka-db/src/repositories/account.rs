//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use eduwaka_core::entities::{Account, AccountId};
use eduwaka_core::error::DomainError;
use eduwaka_core::traits::{AccountRepository, RepoResult};

use crate::models::AccountModel;

use super::error::{account_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of AccountRepository
///
/// Lifecycle transitions are single conditional UPDATEs guarded on the
/// current value of `is_deleted`, so concurrent deactivations and
/// reactivations for the same row serialize on the row lock and a lost
/// update cannot occur.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, username, email, first_name, last_name, password_hash,
                   is_deleted, deleted_at, created_at, updated_at
            FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    // No deleted filter here: the login gate needs to see deactivated
    // accounts to run the recovery policy.
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, username, email, first_name, last_name, password_hash,
                   is_deleted, deleted_at, created_at, updated_at
            FROM accounts
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO accounts (id, username, email, first_name, last_name, password_hash,
                                  is_deleted, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, NULL, $7, $8)
            ",
        )
        .bind(account.id.into_inner())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, account: &Account) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET email = $2, first_name = $3, last_name = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(account.id.into_inner())
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(account.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM accounts WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: AccountId, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: AccountId, at: DateTime<Utc>) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET is_deleted = TRUE, deleted_at = $2, updated_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reactivate(&self, id: AccountId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET is_deleted = FALSE, deleted_at = NULL, updated_at = NOW()
            WHERE id = $1 AND is_deleted = TRUE
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
