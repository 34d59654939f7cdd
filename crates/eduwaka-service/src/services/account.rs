//! Account service
//!
//! Handles profile reads, profile updates, and user-initiated deactivation.
//! Deactivation is the only entry point besides login-recovery that touches
//! the lifecycle state.

use chrono::Utc;
use tracing::{info, instrument};

use eduwaka_core::entities::AccountId;

use crate::dto::{CurrentAccountResponse, DeactivationResponse, UpdateAccountRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current authenticated account
    #[instrument(skip(self))]
    pub async fn get_current_account(
        &self,
        account_id: AccountId,
    ) -> ServiceResult<CurrentAccountResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))?;

        Ok(CurrentAccountResponse::from(&account))
    }

    /// Update the current account's profile fields
    #[instrument(skip(self, request))]
    pub async fn update_account(
        &self,
        account_id: AccountId,
        request: UpdateAccountRequest,
    ) -> ServiceResult<CurrentAccountResponse> {
        let mut account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))?;

        let mut changed = false;

        if let Some(email) = request.email {
            if email != account.email {
                account.set_email(email);
                changed = true;
            }
        }

        if let Some(first_name) = request.first_name {
            account.first_name = first_name;
            changed = true;
        }

        if let Some(last_name) = request.last_name {
            account.last_name = last_name;
            changed = true;
        }

        if changed {
            account.updated_at = Utc::now();
            self.ctx.account_repo().update_profile(&account).await?;
            info!(account_id = %account_id, "Account profile updated");
        }

        Ok(CurrentAccountResponse::from(&account))
    }

    /// Deactivate the current account (soft delete)
    ///
    /// Sets the deactivation timestamp to the moment of the request. The
    /// record is never physically erased here; it stays recoverable through
    /// login for the configured window.
    #[instrument(skip(self))]
    pub async fn deactivate_account(
        &self,
        account_id: AccountId,
    ) -> ServiceResult<DeactivationResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))?;

        let transitioned = self
            .ctx
            .account_repo()
            .deactivate(account.id, Utc::now())
            .await?;

        if !transitioned {
            return Err(ServiceError::conflict("Account is already deactivated"));
        }

        info!(account_id = %account_id, "Account deactivated");
        let window_days = self.ctx.login_gate().window().duration().num_days();
        Ok(DeactivationResponse::new(window_days))
    }
}
