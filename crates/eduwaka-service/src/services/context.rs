//! Service context - dependency container for services
//!
//! Holds the repository, the token service, the password service, and the
//! login gate. Services borrow the context instead of owning dependencies,
//! so a test can assemble one around an in-memory repository.

use std::sync::Arc;

use eduwaka_common::auth::{JwtService, PasswordService};
use eduwaka_core::lifecycle::LoginGate;
use eduwaka_core::traits::AccountRepository;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    account_repo: Arc<dyn AccountRepository>,
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    login_gate: LoginGate,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        jwt_service: Arc<JwtService>,
        login_gate: LoginGate,
    ) -> Self {
        Self {
            account_repo,
            jwt_service,
            password_service: PasswordService::new(),
            login_gate,
        }
    }

    /// Get the account repository
    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the login gate
    pub fn login_gate(&self) -> LoginGate {
        self.login_gate
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("jwt_service", &self.jwt_service)
            .field("login_gate", &self.login_gate)
            .finish_non_exhaustive()
    }
}
