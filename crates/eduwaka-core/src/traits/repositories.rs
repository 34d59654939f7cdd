//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation. The interface is deliberately narrow:
//! lookups plus the two lifecycle transitions. No other operation may
//! touch the deactivation state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Account, AccountId};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID. Returns deactivated accounts as well.
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;

    /// Find account by exact username. Returns deactivated accounts as
    /// well; the login gate decides what happens to them.
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if an email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new account
    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields (names, email). Never touches the
    /// deactivation state or the password hash.
    async fn update_profile(&self, account: &Account) -> RepoResult<()>;

    /// Get the stored password hash for credential verification
    async fn password_hash(&self, id: AccountId) -> RepoResult<Option<String>>;

    /// Replace the stored password hash
    async fn update_password(&self, id: AccountId, password_hash: &str) -> RepoResult<()>;

    /// Mark an active account as deactivated at `at`.
    ///
    /// Returns `true` if the transition happened, `false` if the account
    /// was already deactivated (a concurrent deactivation won the race).
    async fn deactivate(&self, id: AccountId, at: DateTime<Utc>) -> RepoResult<bool>;

    /// Restore a deactivated account to active.
    ///
    /// Returns `true` if the transition happened, `false` if the account
    /// was already active (a concurrent reactivation won the race; the
    /// result is identical either way).
    async fn reactivate(&self, id: AccountId) -> RepoResult<bool>;
}
