//! Page routes for a signed-in user.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use stockinvent_core::BillId;
use stockinvent_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_every_section_renders() {
    let ctx = TestContext::signed_in().await;
    for path in [
        "/dashboard",
        "/inventory",
        "/products/new",
        "/orders",
        "/billing",
        "/billing/B001",
        "/billing/B001/print",
        "/damage-returns",
        "/archives",
    ] {
        let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_inventory_search_narrows_rows() {
    let ctx = TestContext::signed_in().await;
    let body = ctx
        .client
        .get(ctx.url("/inventory?q=chair"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Office Chair"));
    assert!(!body.contains("Wireless Mouse"));
}

#[tokio::test]
async fn test_inventory_export_is_csv() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .get(ctx.url("/inventory/export.csv?category=Storage"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let body = resp.text().await.unwrap();
    assert!(body.contains("Filing Cabinet"));
    assert!(!body.contains("Office Chair"));
}

#[tokio::test]
async fn test_product_form_rejects_missing_name() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/products"))
        .form(&[
            ("product_id", "PRD-200"),
            ("name", ""),
            ("category", "Electronics"),
            ("quantity", "3"),
            ("price", "19.99"),
            ("supplier", "Acme"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_product_form_creates_product() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/products"))
        .form(&[
            ("product_id", "PRD-201"),
            ("name", "Label Printer"),
            ("category", "Electronics"),
            ("quantity", "6"),
            ("price", "129.00"),
            ("supplier", "Brother"),
            ("is_active", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/inventory"));

    let found = ctx.state.products().search("Label Printer", "").await;
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_mark_bill_paid() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/billing/B002/status"))
        .form(&[("status", "paid"), ("return_to", "/billing")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/billing"));

    let bill = ctx
        .state
        .bills()
        .get(&BillId::new("B002"))
        .await
        .unwrap();
    assert!(bill.payment_date.is_some());
}

#[tokio::test]
async fn test_file_damage_return() {
    let ctx = TestContext::signed_in().await;
    let before = ctx.state.returns().list().await.len();

    let resp = ctx
        .client
        .post(ctx.url("/damage-returns"))
        .form(&[
            ("invoice_no", "INV-2023-009"),
            ("order_date", "2023-10-01"),
            ("delivery_date", "2023-10-05"),
            ("issue", "Damaged in Transit"),
            ("product", "Desk Lamp"),
            ("quantity", "2"),
            ("return_date", "2023-10-07"),
            ("description", "Cracked base"),
            ("refund_amount", "79.98"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/damage-returns"));
    assert_eq!(ctx.state.returns().list().await.len(), before + 1);
}

#[tokio::test]
async fn test_unknown_order_is_404() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx.client.get(ctx.url("/orders/NOPE")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
