//! In-memory account repository
//!
//! Implements the repository trait over a mutex-guarded map, with the
//! same conditional-transition semantics as the PostgreSQL backend:
//! `deactivate` and `reactivate` only flip the state when the account is
//! in the expected starting state, and report whether they did.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eduwaka_core::{Account, AccountId, AccountStatus, AccountRepository, DomainError, RepoResult};

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: String,
}

/// Account repository backed by an in-memory map
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, StoredAccount>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing the create path
    pub fn insert(&self, account: Account, password_hash: impl Into<String>) {
        let mut accounts = self.accounts.lock().unwrap();
        accounts.insert(
            account.id,
            StoredAccount {
                account,
                password_hash: password_hash.into(),
            },
        );
    }

    /// Read back the stored account state for assertions
    pub fn stored(&self, id: AccountId) -> Option<Account> {
        let accounts = self.accounts.lock().unwrap();
        accounts.get(&id).map(|s| s.account.clone())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&id).map(|s| s.account.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|s| s.account.username == username)
            .map(|s| s.account.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().any(|s| s.account.username == username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().any(|s| s.account.email == email))
    }

    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .values()
            .any(|s| s.account.username == account.username)
        {
            return Err(DomainError::UsernameAlreadyExists);
        }
        accounts.insert(
            account.id,
            StoredAccount {
                account: account.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn update_profile(&self, account: &Account) -> RepoResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .get_mut(&account.id)
            .ok_or(DomainError::AccountNotFound(account.id))?;
        stored.account.email = account.email.clone();
        stored.account.first_name = account.first_name.clone();
        stored.account.last_name = account.last_name.clone();
        stored.account.updated_at = account.updated_at;
        Ok(())
    }

    async fn password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&id).map(|s| s.password_hash.clone()))
    }

    async fn update_password(&self, id: AccountId, password_hash: &str) -> RepoResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        stored.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn deactivate(&self, id: AccountId, at: DateTime<Utc>) -> RepoResult<bool> {
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        match stored.account.status {
            AccountStatus::Active => {
                stored.account.status = AccountStatus::Deactivated { since: at };
                stored.account.updated_at = at;
                Ok(true)
            }
            AccountStatus::Deactivated { .. } => Ok(false),
        }
    }

    async fn reactivate(&self, id: AccountId) -> RepoResult<bool> {
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        match stored.account.status {
            AccountStatus::Deactivated { .. } => {
                stored.account.status = AccountStatus::Active;
                stored.account.updated_at = Utc::now();
                Ok(true)
            }
            AccountStatus::Active => Ok(false),
        }
    }
}

/// Repository whose every operation fails as a transient store outage
///
/// Used to assert that store failures surface as their own error instead
/// of being reported as bad credentials.
#[derive(Debug, Default)]
pub struct UnavailableAccountRepository;

impl UnavailableAccountRepository {
    fn outage<T>() -> RepoResult<T> {
        Err(DomainError::StoreUnavailable(
            "connection pool timed out".to_string(),
        ))
    }
}

#[async_trait]
impl AccountRepository for UnavailableAccountRepository {
    async fn find_by_id(&self, _id: AccountId) -> RepoResult<Option<Account>> {
        Self::outage()
    }

    async fn find_by_username(&self, _username: &str) -> RepoResult<Option<Account>> {
        Self::outage()
    }

    async fn username_exists(&self, _username: &str) -> RepoResult<bool> {
        Self::outage()
    }

    async fn email_exists(&self, _email: &str) -> RepoResult<bool> {
        Self::outage()
    }

    async fn create(&self, _account: &Account, _password_hash: &str) -> RepoResult<()> {
        Self::outage()
    }

    async fn update_profile(&self, _account: &Account) -> RepoResult<()> {
        Self::outage()
    }

    async fn password_hash(&self, _id: AccountId) -> RepoResult<Option<String>> {
        Self::outage()
    }

    async fn update_password(&self, _id: AccountId, _password_hash: &str) -> RepoResult<()> {
        Self::outage()
    }

    async fn deactivate(&self, _id: AccountId, _at: DateTime<Utc>) -> RepoResult<bool> {
        Self::outage()
    }

    async fn reactivate(&self, _id: AccountId) -> RepoResult<bool> {
        Self::outage()
    }
}
