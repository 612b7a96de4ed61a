//! Tests for the session store
//!
//! Drives login, refresh and logout against a scripted identity backend
//! and checks what ends up in the yewdux store.

use crate::api::ApiError;
use crate::api::test_implementations::ScriptedIdentityApi;
use crate::session::{RefreshOutcome, SessionStore};
use serde_json::json;
use shared::models::{ApiResponse, User, UserRole};
use std::time::Duration;
use yewdux::Context;

fn store(api: ScriptedIdentityApi) -> SessionStore<ScriptedIdentityApi> {
    SessionStore::with_context(api, &Context::new())
}

fn teacher() -> User {
    User::with_role(UserRole::Teacher)
}

#[test]
fn new_session_is_anonymous_and_stale() {
    let session = store(ScriptedIdentityApi::new());
    let state = session.state();

    assert!(state.user().is_none());
    assert!(!state.user_logged_in());
    assert!(!state.is_store_updated());
    assert!(state.role().is_none());
}

#[test]
fn logged_in_follows_every_set_user() {
    let session = store(ScriptedIdentityApi::new());

    for user in [
        Some(teacher()),
        None,
        Some(User::with_role("student")),
        Some(User::with_role("admin")),
        None,
        None,
    ] {
        let expected = user.is_some();
        session.set_user(user);
        assert_eq!(session.state().user_logged_in(), expected);
    }
}

#[test]
fn set_user_exposes_role() {
    let session = store(ScriptedIdentityApi::new());
    session.set_user(Some(User::with_role("student")));
    assert_eq!(session.state().role(), Some(&UserRole::Student));
}

#[test]
fn set_store_updated_is_independent_of_user() {
    let session = store(ScriptedIdentityApi::new());
    session.set_store_updated(true);

    let state = session.state();
    assert!(state.is_store_updated());
    assert!(!state.user_logged_in());
}

#[test]
fn stores_on_the_same_context_share_state() {
    let cx = Context::new();
    let writer = SessionStore::with_context(ScriptedIdentityApi::new(), &cx);
    let reader = SessionStore::with_context(ScriptedIdentityApi::new(), &cx);

    writer.set_user(Some(teacher()));
    assert!(reader.state().user_logged_in());

    let isolated = store(ScriptedIdentityApi::new());
    assert!(!isolated.state().user_logged_in());
}

#[tokio::test]
async fn login_success_sets_user() {
    let api = ScriptedIdentityApi::new().on_login(Ok(ApiResponse::success(teacher())));
    let session = store(api);

    let result = session.login("a@b.com", "pw").await;

    assert!(result.unwrap());
    let state = session.state();
    assert_eq!(state.role(), Some(&UserRole::Teacher));
    assert!(state.user_logged_in());

    let sent = session.api().last_credentials.borrow().clone().unwrap();
    assert_eq!(sent.email, "a@b.com");
    assert_eq!(sent.password, "pw");
}

#[tokio::test]
async fn login_rejection_clears_user_and_reports_backend_error() {
    let api = ScriptedIdentityApi::new()
        .on_login(Ok(ApiResponse::failure("fail", "bad credentials")));
    let session = store(api);
    session.set_user(Some(teacher()));

    let err = session.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "bad credentials");
    assert!(session.state().user().is_none());
    assert!(!session.state().user_logged_in());
}

#[tokio::test]
async fn login_without_error_text_uses_default_message() {
    let api = ScriptedIdentityApi::new().on_login(Ok(ApiResponse {
        message: "fail".to_string(),
        data: None,
        error: None,
    }));
    let session = store(api);

    let err = session.login("a@b.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
}

#[tokio::test]
async fn login_success_without_user_is_malformed() {
    let api = ScriptedIdentityApi::new().on_login(Ok(ApiResponse {
        message: "success".to_string(),
        data: None,
        error: None,
    }));
    let session = store(api);
    session.set_user(Some(teacher()));

    let err = session.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed { .. }));
    assert!(!session.state().user_logged_in());
}

#[tokio::test]
async fn login_transport_failure_clears_user() {
    let api = ScriptedIdentityApi::new().on_login(Err(ApiError::Timeout {
        timeout: Duration::from_secs(30),
    }));
    let session = store(api);
    session.set_user(Some(teacher()));

    let err = session.login("a@b.com", "pw").await.unwrap_err();

    assert!(err.is_transport());
    assert!(session.state().user().is_none());
}

#[tokio::test]
async fn update_store_success_sets_user_and_marks_updated() {
    let api = ScriptedIdentityApi::new().on_current_user(Ok(ApiResponse::success(teacher())));
    let session = store(api);

    let outcome = session.update_store().await;

    assert_eq!(outcome, RefreshOutcome::Authenticated);
    let state = session.state();
    assert!(state.is_store_updated());
    assert_eq!(state.role(), Some(&UserRole::Teacher));
}

#[tokio::test]
async fn update_store_rejection_clears_user_and_marks_updated() {
    let api = ScriptedIdentityApi::new()
        .on_current_user(Ok(ApiResponse::failure("fail", "not logged in")));
    let session = store(api);
    session.set_user(Some(teacher()));

    let outcome = session.update_store().await;

    assert_eq!(outcome, RefreshOutcome::Anonymous);
    assert!(session.state().is_store_updated());
    assert!(!session.state().user_logged_in());
}

#[tokio::test]
async fn update_store_unauthorized_status_is_anonymous() {
    let api = ScriptedIdentityApi::new().on_current_user(Err(ApiError::Status {
        status: 401,
        message: "not logged in".to_string(),
    }));
    let session = store(api);

    assert_eq!(session.update_store().await, RefreshOutcome::Anonymous);
    assert!(session.state().is_store_updated());
}

#[tokio::test]
async fn update_store_backend_outage_is_unreachable() {
    for failure in [
        ApiError::Timeout {
            timeout: Duration::from_secs(30),
        },
        ApiError::Status {
            status: 502,
            message: "Bad gateway".to_string(),
        },
        ApiError::Malformed {
            details: "expected value".to_string(),
        },
    ] {
        let api = ScriptedIdentityApi::new().on_current_user(Err(failure));
        let session = store(api);
        session.set_user(Some(teacher()));

        assert_eq!(session.update_store().await, RefreshOutcome::Unreachable);

        let state = session.state();
        assert!(state.is_store_updated());
        assert!(!state.user_logged_in());
    }
}

#[tokio::test]
async fn logout_success_clears_user() {
    let api = ScriptedIdentityApi::new().on_logout(Ok(ApiResponse {
        message: "success".to_string(),
        data: None,
        error: None,
    }));
    let session = store(api);
    session.set_user(Some(teacher()));

    session.logout().await.unwrap();

    assert!(!session.state().user_logged_in());
}

#[tokio::test]
async fn logout_failure_keeps_user() {
    let api = ScriptedIdentityApi::new().on_logout(Err(ApiError::Status {
        status: 500,
        message: "Request failed with status code 500".to_string(),
    }));
    let session = store(api);
    session.set_user(Some(teacher()));

    let err = session.logout().await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert!(session.state().user_logged_in());
}

#[tokio::test]
async fn logout_without_success_marker_keeps_user() {
    let api = ScriptedIdentityApi::new().on_logout(Ok(ApiResponse {
        message: "fail".to_string(),
        data: Some(json!({})),
        error: Some("session not found".to_string()),
    }));
    let session = store(api);
    session.set_user(Some(teacher()));

    let err = session.logout().await.unwrap_err();

    assert_eq!(err.to_string(), "session not found");
    assert_eq!(session.state().role(), Some(&UserRole::Teacher));
}
