//! Test fixtures
//!
//! Builds a service context around the in-memory repository and seeds
//! accounts in known lifecycle states.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use eduwaka_common::{hash_password, JwtService};
use eduwaka_core::{Account, AccountId, AccountStatus, LoginGate, RecoveryWindow};
use eduwaka_service::ServiceContext;

use crate::memory::{InMemoryAccountRepository, UnavailableAccountRepository};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Password used for every seeded account
pub const TEST_PASSWORD: &str = "CorrectHorse1";

/// A service context wired to an in-memory repository
pub struct TestContext {
    pub repo: Arc<InMemoryAccountRepository>,
    pub ctx: ServiceContext,
}

impl TestContext {
    /// Create a context with the default 30-day recovery window
    pub fn new() -> Self {
        Self::with_window(RecoveryWindow::default())
    }

    /// Create a context with a custom recovery window
    pub fn with_window(window: RecoveryWindow) -> Self {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let jwt_service = Arc::new(JwtService::new("test-secret-key", 3600, 86400));
        let ctx = ServiceContext::new(repo.clone(), jwt_service, LoginGate::new(window));
        Self { repo, ctx }
    }

    /// Seed an active account, returning its ID
    pub fn seed_active(&self, username: &str) -> AccountId {
        let account = Account::new(
            AccountId::generate(),
            username.to_string(),
            format!("{username}@example.com"),
        );
        let id = account.id;
        let hash = hash_password(TEST_PASSWORD).expect("hashing test password");
        self.repo.insert(account, hash);
        id
    }

    /// Seed an account deactivated at `since`, returning its ID
    pub fn seed_deactivated(&self, username: &str, since: DateTime<Utc>) -> AccountId {
        let mut account = Account::new(
            AccountId::generate(),
            username.to_string(),
            format!("{username}@example.com"),
        );
        account.status = AccountStatus::Deactivated { since };
        let id = account.id;
        let hash = hash_password(TEST_PASSWORD).expect("hashing test password");
        self.repo.insert(account, hash);
        id
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A service context whose repository fails every call
pub fn unavailable_context() -> ServiceContext {
    let repo = Arc::new(UnavailableAccountRepository);
    let jwt_service = Arc::new(JwtService::new("test-secret-key", 3600, 86400));
    ServiceContext::new(repo, jwt_service, LoginGate::default())
}

/// A unique username for a test
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}
