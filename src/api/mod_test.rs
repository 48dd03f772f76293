use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::models::{CashflowRequest, Invoice, LoginRequest, PaymentRequest};
use crate::routing::{GuardOutcome, Navigator};
use crate::storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::test_support::context_for;

fn org() -> Uuid {
    Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap()
}

// =============================================================================
// auth
// =============================================================================

#[tokio::test]
async fn login_and_establish_stores_token_and_user() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({ "email": "a@b.test", "password": "Secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-1",
            "user": { "id": "u1", "orgId": org().to_string() }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = LoginRequest { email: "a@b.test".into(), password: "Secret1".into() };
    let response = ctx.api.auth().login_and_establish(&request, &ctx.auth).await.unwrap();

    assert_eq!(response.token.as_deref(), Some("jwt-1"));
    assert!(ctx.auth.is_authenticated_value());
    assert_eq!(ctx.store.get(AUTH_TOKEN_KEY).as_deref(), Some("jwt-1"));
    assert!(ctx.store.get(CURRENT_USER_KEY).unwrap().contains("u1"));
}

#[tokio::test]
async fn login_without_token_leaves_session_empty() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "check email" })))
        .mount(&server)
        .await;

    let request = LoginRequest { email: "a@b.test".into(), password: "x".into() };
    ctx.api.auth().login_and_establish(&request, &ctx.auth).await.unwrap();
    assert!(!ctx.auth.is_authenticated_value());
}

#[tokio::test]
async fn login_with_empty_token_leaves_session_empty() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "", "user": { "id": "u1" } })))
        .mount(&server)
        .await;

    let request = LoginRequest { email: "a@b.test".into(), password: "x".into() };
    ctx.api.auth().login_and_establish(&request, &ctx.auth).await.unwrap();
    assert!(!ctx.auth.is_authenticated_value());
    assert_eq!(ctx.store.get(AUTH_TOKEN_KEY), None);
    assert_eq!(ctx.store.get(CURRENT_USER_KEY), None);
}

// =============================================================================
// resources
// =============================================================================

#[tokio::test]
async fn invoices_list_uses_org_path_and_bearer() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;
    ctx.auth.set_token("tok");

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/invoices/{}", org())))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "invoiceNumber": "INV-1", "totalAmount": 10.0 },
            { "invoiceNumber": "INV-2", "status": "Paid" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let invoices = ctx.api.invoices().list(org()).await.unwrap();
    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[1].status.as_deref(), Some("Paid"));
}

#[tokio::test]
async fn invoice_create_posts_camel_case_body() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/invoices"))
        .and(body_json(json!({ "orgId": org().to_string(), "invoiceNumber": "INV-9" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "invoiceNumber": "INV-9" })))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = Invoice { org_id: Some(org()), invoice_number: Some("INV-9".into()), ..Default::default() };
    let created = ctx.api.invoices().create(&invoice).await.unwrap();
    assert_eq!(created.invoice_number.as_deref(), Some("INV-9"));
}

#[tokio::test]
async fn payment_update_accepts_no_content() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;
    let id = Uuid::nil();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/payments/{id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let req = PaymentRequest { amount: Some(5.0), ..Default::default() };
    assert_eq!(ctx.api.payments().update(id, &req).await.unwrap(), None);
}

#[tokio::test]
async fn vendor_delete_ignores_body() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;
    let id = Uuid::nil();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/vendors/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Vendor deleted"))
        .expect(1)
        .mount(&server)
        .await;

    ctx.api.vendors().delete(id).await.unwrap();
}

#[tokio::test]
async fn user_role_update_sends_role() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;
    let id = Uuid::nil();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/users/{id}/role")))
        .and(body_json(json!({ "role": "Accountant" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "Accountant" })))
        .expect(1)
        .mount(&server)
        .await;

    let user = ctx.api.users().update_role(id, "Accountant").await.unwrap().unwrap();
    assert_eq!(user.role.as_deref(), Some("Accountant"));
}

#[tokio::test]
async fn cashflow_month_and_generate() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/CashflowPrediction/{}/2025/3", org())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "month": "2025-03", "projectedInflow": 900.0, "projectedOutflow": 400.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/CashflowPrediction/generate/{}", org())))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let march = ctx.api.cashflow().for_month(org(), 2025, 3).await.unwrap().unwrap();
    assert!((march.net() - 500.0).abs() < f64::EPSILON);
    assert!(ctx.api.cashflow().generate(org()).await.unwrap().is_empty());
}

#[tokio::test]
async fn openai_predict_cashflow_returns_raw_json() {
    let server = MockServer::start().await;
    let (ctx, _) = context_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/OpenAI/predict-cashflow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": "steady" })))
        .mount(&server)
        .await;

    let out = ctx
        .api
        .openai()
        .predict_cashflow(&CashflowRequest { org_id: org(), months: 3 })
        .await
        .unwrap();
    assert_eq!(out["summary"], "steady");
}

// =============================================================================
// session expiry end to end
// =============================================================================

#[tokio::test]
async fn expired_session_blocks_guard_until_next_login() {
    let server = MockServer::start().await;
    let (ctx, nav) = context_for(&server).await;
    ctx.auth.set_token("expired");
    let guard = ctx.guard();
    assert_eq!(guard.check("/payments"), GuardOutcome::Allow);

    nav.navigate("/payments");
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/payments/org/{}", org())))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = ctx.api.payments().for_org(org()).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(nav.current_route(), "/login?returnUrl=%2Fpayments");
    assert_eq!(
        guard.check("/payments"),
        GuardOutcome::Redirect("/login?returnUrl=%2Fpayments".into())
    );
}
