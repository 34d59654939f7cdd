//! Account lifecycle integration tests
//!
//! Exercises the full login guard through the service layer against the
//! in-memory repository: credential checks, recovery-window boundaries,
//! reactivation persistence, and store-outage reporting.
//!
//! Run with: cargo test -p integration-tests --test auth_lifecycle_tests

use chrono::{Duration, Utc};
use eduwaka_common::AppError;
use eduwaka_core::{DomainError, RecoveryWindow};
use eduwaka_service::{
    AccountService, AuthService, ChangePasswordRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, ServiceError,
};
use integration_tests::{unavailable_context, unique_username, TestContext, TEST_PASSWORD};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Credential checks
// ============================================================================

#[tokio::test]
async fn unknown_username_is_rejected_as_invalid_credentials() {
    let tc = TestContext::new();
    let service = AuthService::new(&tc.ctx);

    let err = service
        .authenticate("no-such-user", TEST_PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn active_account_with_correct_password_logs_in() {
    let tc = TestContext::new();
    let username = unique_username("active");
    tc.seed_active(&username);
    let service = AuthService::new(&tc.ctx);

    let authenticated = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();

    assert!(!authenticated.recovered);
    assert!(authenticated.account.is_active());
}

#[tokio::test]
async fn active_account_with_wrong_password_is_rejected() {
    let tc = TestContext::new();
    let username = unique_username("active");
    tc.seed_active(&username);
    let service = AuthService::new(&tc.ctx);

    let err = service
        .authenticate(&username, "WrongPassword1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::InvalidCredentials)
    ));
}

// ============================================================================
// Recovery window
// ============================================================================

#[tokio::test]
async fn deactivated_account_inside_window_is_recovered_on_login() {
    let tc = TestContext::new();
    let username = unique_username("dormant");
    let id = tc.seed_deactivated(&username, Utc::now() - Duration::days(29));
    let service = AuthService::new(&tc.ctx);

    let authenticated = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();

    assert!(authenticated.recovered);
    assert!(authenticated.account.is_active());

    // The reactivation must be persisted, not just reported
    let stored = tc.repo.stored(id).unwrap();
    assert!(stored.is_active());
}

#[tokio::test]
async fn wrong_password_leaves_deactivated_account_deactivated() {
    let tc = TestContext::new();
    let username = unique_username("dormant");
    let id = tc.seed_deactivated(&username, Utc::now() - Duration::days(29));
    let service = AuthService::new(&tc.ctx);

    let err = service
        .authenticate(&username, "WrongPassword1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::InvalidCredentials)
    ));
    let stored = tc.repo.stored(id).unwrap();
    assert!(!stored.is_active());
}

#[tokio::test]
async fn expired_account_is_refused_with_correct_password() {
    let tc = TestContext::new();
    let username = unique_username("expired");
    let id = tc.seed_deactivated(&username, Utc::now() - Duration::days(31));
    let service = AuthService::new(&tc.ctx);

    let err = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::AccountPermanentlyDeleted)
    ));
    assert_eq!(err.status_code(), 403);
    let stored = tc.repo.stored(id).unwrap();
    assert!(!stored.is_active());
}

#[tokio::test]
async fn expired_account_is_refused_the_same_way_with_wrong_password() {
    let tc = TestContext::new();
    let username = unique_username("expired");
    tc.seed_deactivated(&username, Utc::now() - Duration::days(31));
    let service = AuthService::new(&tc.ctx);

    // The refusal does not depend on the password at all
    let err = service
        .authenticate(&username, "WrongPassword1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::AccountPermanentlyDeleted)
    ));
}

#[tokio::test]
async fn deactivation_exactly_one_window_ago_is_still_recoverable() {
    let tc = TestContext::new();
    let username = unique_username("boundary");
    // A few seconds short of a full 30 days by the time the check runs,
    // which sits on the recoverable side of the inclusive boundary.
    tc.seed_deactivated(&username, Utc::now() - Duration::days(30) + Duration::seconds(5));
    let service = AuthService::new(&tc.ctx);

    let authenticated = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();

    assert!(authenticated.recovered);
}

#[tokio::test]
async fn login_after_recovery_is_an_ordinary_login() {
    let tc = TestContext::new();
    let username = unique_username("dormant");
    tc.seed_deactivated(&username, Utc::now() - Duration::days(10));
    let service = AuthService::new(&tc.ctx);

    let first = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();
    assert!(first.recovered);

    let second = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();
    assert!(!second.recovered);
}

#[tokio::test]
async fn repeated_logins_on_an_active_account_leave_the_record_untouched() {
    let tc = TestContext::new();
    let username = unique_username("steady");
    let id = tc.seed_active(&username);
    let service = AuthService::new(&tc.ctx);

    let before = tc.repo.stored(id).unwrap();

    for _ in 0..2 {
        let authenticated = service
            .authenticate(&username, TEST_PASSWORD)
            .await
            .unwrap();
        assert!(!authenticated.recovered);
    }

    // Authentication on an active account is read-only
    assert_eq!(tc.repo.stored(id).unwrap(), before);
}

#[tokio::test]
async fn custom_recovery_window_is_honoured() {
    let tc = TestContext::with_window(RecoveryWindow::days(7));
    let username = unique_username("shortwin");
    tc.seed_deactivated(&username, Utc::now() - Duration::days(8));
    let service = AuthService::new(&tc.ctx);

    let err = service
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::App(AppError::AccountPermanentlyDeleted)
    ));
}

#[tokio::test]
async fn recovered_login_carries_a_detail_message() {
    let tc = TestContext::new();
    let username = unique_username("dormant");
    tc.seed_deactivated(&username, Utc::now() - Duration::days(5));
    let service = AuthService::new(&tc.ctx);

    let response = service
        .login(login_request(&username, TEST_PASSWORD))
        .await
        .unwrap();

    assert!(response.detail.unwrap().contains("recovered"));
    assert!(!response.access_token.is_empty());
}

#[tokio::test]
async fn ordinary_login_has_no_detail_message() {
    let tc = TestContext::new();
    let username = unique_username("active");
    tc.seed_active(&username);
    let service = AuthService::new(&tc.ctx);

    let response = service
        .login(login_request(&username, TEST_PASSWORD))
        .await
        .unwrap();

    assert!(response.detail.is_none());
}

// ============================================================================
// Store failures
// ============================================================================

#[tokio::test]
async fn store_outage_is_not_reported_as_invalid_credentials() {
    let ctx = unavailable_context();
    let service = AuthService::new(&ctx);

    let err = service
        .authenticate("anyone", TEST_PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::StoreUnavailable(_))
    ));
    assert_eq!(err.status_code(), 503);
}

// ============================================================================
// Deactivation
// ============================================================================

#[tokio::test]
async fn deactivating_an_account_names_the_recovery_window() {
    let tc = TestContext::new();
    let username = unique_username("leaver");
    let id = tc.seed_active(&username);
    let service = AccountService::new(&tc.ctx);

    let response = service.deactivate_account(id).await.unwrap();

    assert!(response.detail.contains("30 days"));
    let stored = tc.repo.stored(id).unwrap();
    assert!(!stored.is_active());
}

#[tokio::test]
async fn deactivating_twice_is_a_conflict() {
    let tc = TestContext::new();
    let username = unique_username("leaver");
    let id = tc.seed_active(&username);
    let service = AccountService::new(&tc.ctx);

    service.deactivate_account(id).await.unwrap();
    let err = service.deactivate_account(id).await.unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn deactivate_then_login_round_trip() {
    let tc = TestContext::new();
    let username = unique_username("roundtrip");
    let id = tc.seed_active(&username);

    AccountService::new(&tc.ctx)
        .deactivate_account(id)
        .await
        .unwrap();

    let authenticated = AuthService::new(&tc.ctx)
        .authenticate(&username, TEST_PASSWORD)
        .await
        .unwrap();

    assert!(authenticated.recovered);
    assert!(tc.repo.stored(id).unwrap().is_active());
}

// ============================================================================
// Tokens and passwords
// ============================================================================

#[tokio::test]
async fn refresh_never_resurrects_a_deactivated_account() {
    let tc = TestContext::new();
    let username = unique_username("refresher");
    let id = tc.seed_active(&username);
    let auth = AuthService::new(&tc.ctx);

    let tokens = auth
        .login(login_request(&username, TEST_PASSWORD))
        .await
        .unwrap();

    AccountService::new(&tc.ctx)
        .deactivate_account(id)
        .await
        .unwrap();

    let err = auth
        .refresh_tokens(RefreshTokenRequest {
            refresh_token: tokens.refresh_token,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::App(AppError::InvalidToken)));
    assert!(!tc.repo.stored(id).unwrap().is_active());
}

#[tokio::test]
async fn register_then_login() {
    let tc = TestContext::new();
    let username = unique_username("fresh");
    let auth = AuthService::new(&tc.ctx);

    let registered = auth
        .register(RegisterRequest {
            username: username.clone(),
            email: format!("{username}@example.com"),
            password: TEST_PASSWORD.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        })
        .await
        .unwrap();
    assert_eq!(registered.account.username, username);

    let response = auth
        .login(login_request(&username, TEST_PASSWORD))
        .await
        .unwrap();
    assert!(response.detail.is_none());
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let tc = TestContext::new();
    let username = unique_username("rotator");
    let id = tc.seed_active(&username);
    let auth = AuthService::new(&tc.ctx);

    let err = auth
        .change_password(
            id,
            ChangePasswordRequest {
                old_password: "WrongPassword1".to_string(),
                new_password: "BrandNewPass1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    auth.change_password(
        id,
        ChangePasswordRequest {
            old_password: TEST_PASSWORD.to_string(),
            new_password: "BrandNewPass1".to_string(),
        },
    )
    .await
    .unwrap();

    let authenticated = auth.authenticate(&username, "BrandNewPass1").await.unwrap();
    assert!(!authenticated.recovered);
}
