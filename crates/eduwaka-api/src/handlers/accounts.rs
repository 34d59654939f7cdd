//! Account handlers
//!
//! Endpoints for the authenticated account's own profile, including the
//! soft-delete deactivation that starts the recovery window.

use axum::{extract::State, Json};
use eduwaka_service::{
    AccountService, CurrentAccountResponse, DeactivationResponse, UpdateAccountRequest,
};

use crate::extractors::{AuthAccount, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the current account's profile
///
/// GET /accounts/@me
pub async fn get_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> ApiResult<Json<CurrentAccountResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.get_current_account(auth.account_id).await?;
    Ok(Json(response))
}

/// Update the current account's profile
///
/// PATCH /accounts/@me
pub async fn update_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<Json<CurrentAccountResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.update_account(auth.account_id, request).await?;
    Ok(Json(response))
}

/// Deactivate the current account (soft delete)
///
/// DELETE /accounts/@me
///
/// The account is marked deleted rather than removed. Logging in again
/// within the recovery window reactivates it.
pub async fn deactivate_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> ApiResult<Json<DeactivationResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.deactivate_account(auth.account_id).await?;
    Ok(Json(response))
}
