//! Error handling utilities for repositories

use eduwaka_core::entities::AccountId;
use eduwaka_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Transient infrastructure failures (pool exhaustion, broken connections)
/// become `StoreUnavailable` so callers can tell a dead store apart from a
/// bad credential. Everything else is a plain database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_transient(&e) {
        DomainError::StoreUnavailable(e.to_string())
    } else {
        DomainError::DatabaseError(e.to_string())
    }
}

fn is_transient(e: &SqlxError) -> bool {
    matches!(
        e,
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) | SqlxError::Tls(_)
    )
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Create an "account not found" error
pub fn account_not_found(id: AccountId) -> DomainError {
    DomainError::AccountNotFound(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_not_transient() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
