//! Account database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the accounts table
///
/// The soft-delete pair (`is_deleted`, `deleted_at`) is kept as two columns
/// with a CHECK constraint tying them together; the mapper folds them back
/// into a single status value.
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountModel {
    /// Check if the account is soft deleted
    #[inline]
    pub fn is_deactivated(&self) -> bool {
        self.is_deleted
    }
}
