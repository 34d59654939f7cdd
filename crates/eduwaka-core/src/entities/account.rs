//! Account entity - represents a registered user of the admissions platform

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::lifecycle::AccountStatus;

/// Unique identifier for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Wrap an existing UUID
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Account entity with its lifecycle status
///
/// The soft-delete pair (flag + timestamp) is modelled as a single
/// [`AccountStatus`] value, so a deactivation timestamp cannot exist
/// without the account being deactivated and vice versa. The only code
/// paths that change the status are [`Account::deactivate`] and
/// [`Account::reactivate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with required fields
    pub fn new(id: AccountId, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name, falling back to the username when no names are set
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    /// Check whether the account is currently active
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active)
    }

    /// Mark the account as deactivated at `now`
    ///
    /// # Errors
    /// Returns [`DomainError::AlreadyDeactivated`] if the account is not active.
    pub fn deactivate(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            AccountStatus::Active => {
                self.status = AccountStatus::Deactivated { since: now };
                self.updated_at = now;
                Ok(())
            }
            AccountStatus::Deactivated { .. } => Err(DomainError::AlreadyDeactivated),
        }
    }

    /// Clear the deactivation marker, restoring the account to active
    ///
    /// # Errors
    /// Returns [`DomainError::NotDeactivated`] if the account is already active.
    pub fn reactivate(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            AccountStatus::Deactivated { .. } => {
                self.status = AccountStatus::Active;
                self.updated_at = now;
                Ok(())
            }
            AccountStatus::Active => Err(DomainError::NotDeactivated),
        }
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }
}
