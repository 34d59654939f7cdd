//! Account entity <-> model mapper

use eduwaka_core::entities::{Account, AccountId};
use eduwaka_core::error::DomainError;
use eduwaka_core::lifecycle::AccountStatus;

use crate::models::AccountModel;

/// Convert AccountModel to Account entity
///
/// Fails if the row violates the soft-delete invariant (deleted flag set
/// without a timestamp, or a timestamp without the flag); the CHECK
/// constraint on the table makes that unreachable in practice.
impl TryFrom<AccountModel> for Account {
    type Error = DomainError;

    fn try_from(model: AccountModel) -> Result<Self, Self::Error> {
        let status = match (model.is_deleted, model.deleted_at) {
            (false, None) => AccountStatus::Active,
            (true, Some(since)) => AccountStatus::Deactivated { since },
            (is_deleted, deleted_at) => {
                return Err(DomainError::InternalError(format!(
                    "inconsistent soft-delete columns for account {}: is_deleted={is_deleted}, deleted_at={deleted_at:?}",
                    model.id
                )));
            }
        };

        Ok(Account {
            id: AccountId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn model() -> AccountModel {
        let now = Utc::now();
        AccountModel {
            id: Uuid::new_v4(),
            username: "chidi".to_string(),
            email: "chidi@example.com".to_string(),
            first_name: "Chidi".to_string(),
            last_name: "Eze".to_string(),
            password_hash: "$argon2id$...".to_string(),
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_active_row_maps_to_active_status() {
        let account = Account::try_from(model()).unwrap();
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.username, "chidi");
    }

    #[test]
    fn test_deactivated_row_carries_timestamp() {
        let mut m = model();
        let since = Utc::now();
        m.is_deleted = true;
        m.deleted_at = Some(since);

        let account = Account::try_from(m).unwrap();
        assert_eq!(account.status, AccountStatus::Deactivated { since });
    }

    #[test]
    fn test_inconsistent_row_is_rejected() {
        let mut m = model();
        m.is_deleted = true;
        m.deleted_at = None;
        assert!(Account::try_from(m).is_err());

        let mut m = model();
        m.is_deleted = false;
        m.deleted_at = Some(Utc::now());
        assert!(Account::try_from(m).is_err());
    }
}
