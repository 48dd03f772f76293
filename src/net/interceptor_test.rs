use reqwest::header::AUTHORIZATION;

use super::*;
use crate::routing::LoggingNavigator;
use crate::storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, KeyValueStore, MemoryStore};

fn interceptor() -> (Arc<MemoryStore>, Arc<AuthState>, Arc<LoggingNavigator>, AuthInterceptor) {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(AuthState::new(store.clone()));
    let nav = Arc::new(LoggingNavigator::new("/invoices"));
    let interceptor = AuthInterceptor::new(auth.clone(), nav.clone());
    (store, auth, nav, interceptor)
}

fn authorization(interceptor: &AuthInterceptor) -> Option<String> {
    let request = interceptor
        .decorate(reqwest::Client::new().get("http://localhost/api/v1/organizations"))
        .build()
        .unwrap();
    request
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap().to_owned())
}

// =============================================================================
// decorate
// =============================================================================

#[test]
fn decorate_adds_bearer_when_token_present() {
    let (_, auth, _, interceptor) = interceptor();
    auth.set_token("abc123");
    assert_eq!(authorization(&interceptor).as_deref(), Some("Bearer abc123"));
}

#[test]
fn decorate_leaves_request_alone_without_token() {
    let (_, _, _, interceptor) = interceptor();
    assert_eq!(authorization(&interceptor), None);
}

#[test]
fn decorate_skips_empty_token() {
    let (_, auth, _, interceptor) = interceptor();
    auth.establish_session("", Some(serde_json::json!({ "id": "u1" })));
    assert_eq!(authorization(&interceptor), None);
}

#[test]
fn decorate_reads_token_at_call_time() {
    let (_, auth, _, interceptor) = interceptor();
    auth.set_token("old");
    assert_eq!(authorization(&interceptor).as_deref(), Some("Bearer old"));

    auth.set_token("new");
    assert_eq!(authorization(&interceptor).as_deref(), Some("Bearer new"));

    auth.logout();
    assert_eq!(authorization(&interceptor), None);
}

// =============================================================================
// observe_status
// =============================================================================

#[test]
fn unauthorized_clears_session_and_redirects() {
    let (store, auth, nav, interceptor) = interceptor();
    auth.establish_session("tok", Some(serde_json::json!({ "id": "u1" })));

    assert!(interceptor.observe_status(StatusCode::UNAUTHORIZED));

    assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    assert_eq!(store.get(CURRENT_USER_KEY), None);
    assert!(!auth.is_authenticated_value());
    assert_eq!(nav.history(), vec!["/login?returnUrl=%2Finvoices"]);
}

#[test]
fn repeated_unauthorized_is_idempotent() {
    let (_, auth, nav, interceptor) = interceptor();
    auth.set_token("tok");

    interceptor.observe_status(StatusCode::UNAUTHORIZED);
    interceptor.observe_status(StatusCode::UNAUTHORIZED);

    assert!(!auth.is_authenticated_value());
    assert_eq!(nav.current_route(), "/login");
    assert_eq!(nav.history().len(), 2);
}

#[test]
fn other_errors_pass_through() {
    let (_, auth, nav, interceptor) = interceptor();
    auth.set_token("tok");

    for status in [StatusCode::FORBIDDEN, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
        assert!(!interceptor.observe_status(status));
    }
    assert!(auth.is_authenticated_value());
    assert!(nav.history().is_empty());
}
