//! Entity -> DTO mappers

use eduwaka_core::entities::Account;

use super::responses::CurrentAccountResponse;

impl From<&Account> for CurrentAccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            created_at: account.created_at,
        }
    }
}
