//! Authentication service
//!
//! Handles registration, login with the account-recovery policy, token
//! refresh, and password changes. Every login attempt goes through the
//! [`LoginGate`] from the domain layer; this service only carries out the
//! decision it returns.

use chrono::Utc;
use tracing::{info, instrument, warn};

use eduwaka_common::auth::{hash_password, validate_password_strength};
use eduwaka_common::AppError;
use eduwaka_core::entities::{Account, AccountId};
use eduwaka_core::lifecycle::LoginDecision;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, CurrentAccountResponse, LoginRequest,
    RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message attached to a login that recovered a deactivated account
const RECOVERED_DETAIL: &str = "Account recovered and logged in successfully.";

/// Result of a successful authentication decision
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub account: Account,
    /// Whether this login recovered a deactivated account
    pub recovered: bool,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self
            .ctx
            .account_repo()
            .username_exists(&request.username)
            .await?
        {
            return Err(ServiceError::conflict("Username already registered"));
        }

        if self.ctx.account_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut account = Account::new(AccountId::generate(), request.username, request.email);
        account.first_name = request.first_name.unwrap_or_default();
        account.last_name = request.last_name.unwrap_or_default();

        self.ctx
            .account_repo()
            .create(&account, &password_hash)
            .await?;

        info!(account_id = %account.id, "Account registered successfully");

        self.issue_tokens(&account, None)
    }

    /// Login with username and password
    ///
    /// Runs the full lifecycle guard: unknown usernames and wrong passwords
    /// are rejected as invalid credentials; a deactivated account inside the
    /// recovery window is reactivated on a correct password; one outside the
    /// window is refused as permanently deleted.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let authenticated = self
            .authenticate(&request.username, &request.password)
            .await?;

        let detail = authenticated.recovered.then(|| RECOVERED_DETAIL.to_string());
        self.issue_tokens(&authenticated.account, detail)
    }

    /// Run the authentication decision for a single attempt
    ///
    /// This is a synchronous, single-attempt decision: nothing is retried
    /// here, and there is no lockout after repeated failures. A store
    /// failure propagates as its own error so callers never mistake it for
    /// a bad credential.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> ServiceResult<Authenticated> {
        let account = self
            .ctx
            .account_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Login failed: unknown username");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let now = Utc::now();
        match self.ctx.login_gate().decide(&account.status, now) {
            LoginDecision::VerifyPassword => {
                self.verify_password(&account, password).await?;
                info!(account_id = %account.id, "Login successful");
                Ok(Authenticated {
                    account,
                    recovered: false,
                })
            }
            LoginDecision::VerifyAndReactivate => {
                // Wrong password must leave the account deactivated
                self.verify_password(&account, password).await?;

                // Persist the reactivation before reporting success. The
                // conditional UPDATE returns false when a concurrent login
                // already recovered the account, which is the same outcome.
                let mut account = account;
                self.ctx.account_repo().reactivate(account.id).await?;
                // The gate only hands out this decision for a deactivated
                // account, so the entity transition cannot fail here.
                account.reactivate(now).map_err(ServiceError::from)?;

                info!(account_id = %account.id, "Deactivated account recovered on login");
                Ok(Authenticated {
                    account,
                    recovered: true,
                })
            }
            LoginDecision::RefusePermanentlyDeleted => {
                // The password is deliberately never examined on this
                // branch, matching the deployed behaviour.
                warn!(account_id = %account.id, "Login refused: recovery window expired");
                Err(ServiceError::App(AppError::AccountPermanentlyDeleted))
            }
        }
    }

    /// Refresh access token using a refresh token
    ///
    /// Refresh never resurrects an account: a deactivated or missing
    /// account invalidates the token.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;
        let account_id = claims.account_id().map_err(ServiceError::from)?;

        let account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if !account.is_active() {
            warn!(account_id = %account.id, "Refresh refused: account deactivated");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        info!(account_id = %account.id, "Tokens refreshed successfully");
        self.issue_tokens(&account, None)
    }

    /// Change the password for an authenticated account
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        account_id: AccountId,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let stored_hash = self
            .ctx
            .account_repo()
            .password_hash(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))?;

        let old_is_valid = self
            .ctx
            .password_service()
            .verify(&request.old_password, &stored_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !old_is_valid {
            return Err(ServiceError::validation("Old password is incorrect"));
        }

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .account_repo()
            .update_password(account_id, &new_hash)
            .await?;

        info!(account_id = %account_id, "Password changed successfully");
        Ok(())
    }

    /// Validate an access token and return the account ID
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<AccountId> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .map_err(ServiceError::from)?;

        claims.account_id().map_err(ServiceError::from)
    }

    /// Verify a password against the stored hash, rejecting on mismatch
    async fn verify_password(&self, account: &Account, password: &str) -> ServiceResult<()> {
        let stored_hash = self
            .ctx
            .account_repo()
            .password_hash(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = self
            .ctx
            .password_service()
            .verify(password, &stored_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        Ok(())
    }

    fn issue_tokens(
        &self,
        account: &Account,
        detail: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(account.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut response = AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentAccountResponse::from(account),
        );
        response.detail = detail;
        Ok(response)
    }
}
