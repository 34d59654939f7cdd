//! Authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use eduwaka_core::AccountId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// Account ID from the JWT token
    pub account_id: AccountId,
}

impl AuthAccount {
    /// Create a new AuthAccount
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        // Get the app state to access JWT service
        let app_state = AppState::from_ref(state);

        // Validate the token
        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidAuthFormat
            })?;

        // Extract account ID from claims
        let account_id = claims.account_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid account ID in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthAccount::new(account_id))
    }
}
