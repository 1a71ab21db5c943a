//! Sign-in flows against the offline identity provider.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use stockinvent_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_pages_redirect_to_login_when_signed_out() {
    let ctx = TestContext::new().await;

    for path in ["/", "/dashboard", "/inventory", "/orders", "/billing", "/archives"] {
        let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_api_returns_401_when_signed_out() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/api/products")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_page_lists_test_numbers_in_offline_mode() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/login")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("+911234567890"));
    assert!(body.contains("Continue with Google"));
}

#[tokio::test]
async fn test_email_sign_in_reaches_dashboard() {
    let ctx = TestContext::signed_in().await;

    let resp = ctx.client.get(ctx.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Stock Alerts"));
    assert!(body.contains("manager"));

    let resp = ctx.client.get(ctx.url("/login")).send().await.unwrap();
    assert_eq!(location(&resp), Some("/dashboard"));
}

#[tokio::test]
async fn test_email_sign_in_with_bad_email_rerenders_login() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/login/password"))
        .form(&[("email", "not-an-email"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.text().await.unwrap().contains("alert-error"));
}

#[tokio::test]
async fn test_phone_sign_in_with_test_number() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/login/phone/send"))
        .form(&[("phone_number", "+911234567890")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/login?tab=phone"));

    let page = ctx
        .client
        .get(ctx.url("/login?tab=phone"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("/login/phone/verify"));

    let resp = ctx
        .client
        .post(ctx.url("/login/phone/verify"))
        .form(&[("otp", "000000")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = ctx
        .client
        .post(ctx.url("/login/phone/verify"))
        .form(&[("otp", "123456")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/dashboard"));
}

#[tokio::test]
async fn test_verify_without_pending_code_is_rejected() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/login/phone/verify"))
        .form(&[("otp", "123456")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_round_trip() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/auth/google")).send().await.unwrap();
    let callback = location(&resp).unwrap().to_string();
    assert!(callback.starts_with(&ctx.url("/auth/google/callback?csrf=")));

    let resp = ctx.client.get(&callback).send().await.unwrap();
    assert_eq!(location(&resp), Some("/dashboard"));

    // The state token is single use.
    ctx.client.post(ctx.url("/auth/logout")).send().await.unwrap();
    let resp = ctx.client.get(&callback).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx.client.post(ctx.url("/auth/logout")).send().await.unwrap();
    assert_eq!(location(&resp), Some("/login"));

    let resp = ctx.client.get(ctx.url("/dashboard")).send().await.unwrap();
    assert_eq!(location(&resp), Some("/login"));
}
