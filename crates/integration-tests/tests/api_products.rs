//! Product JSON API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use stockinvent_integration_tests::TestContext;

#[tokio::test]
async fn test_search_filters_by_category() {
    let ctx = TestContext::signed_in().await;
    let body: Value = ctx
        .client
        .get(ctx.url("/api/products?category=Furniture"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    let products = body["data"].as_array().unwrap();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p["category"] == "Furniture"));
}

#[tokio::test]
async fn test_create_update_delete() {
    let ctx = TestContext::signed_in().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-100",
            "name": "Standing Desk Mat",
            "category": "Office Supplies",
            "quantity": 14,
            "price": "49.99",
            "supplier": "ErgoWorks"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/products/{id}")))
        .json(&json!({ "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["data"]["quantity"], 2);

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_duplicate_product_code_conflicts() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-001",
            "name": "Another Laptop",
            "category": "Electronics",
            "quantity": 1,
            "price": "999.00",
            "supplier": "Dell Inc."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_product_lists_field_errors() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-101",
            "name": "",
            "category": "Electronics",
            "quantity": 1,
            "price": "10.00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert!(body["errors"]["name"].is_string());
}

#[tokio::test]
async fn test_sidebar_preference_is_saved() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/preferences/sidebar"))
        .json(&json!({ "collapsed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let page = ctx
        .client
        .get(ctx.url("/inventory"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("sidebar-collapsed"));
}

#[tokio::test]
async fn test_malformed_payloads_use_the_envelope() {
    let ctx = TestContext::signed_in().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-102",
            "name": "Cable Tray",
            "category": "Accessories",
            "quantity": -1,
            "price": "12.00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("quantity"));

    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"product_id\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    let resp = ctx
        .client
        .put(ctx.url("/api/products/1"))
        .json(&json!({ "quantity": "lots" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_oversized_price_is_rejected() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-103",
            "name": "Gold Plated Server",
            "category": "Electronics",
            "quantity": 2,
            "price": "79228162514264337593543950335"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert!(body["errors"]["price"].is_string());
}

#[tokio::test]
async fn test_pages_survive_a_stored_oversized_price() {
    let ctx = TestContext::signed_in().await;
    let input = serde_json::from_value(json!({
        "product_id": "PRD-104",
        "name": "Gold Plated Server",
        "category": "Electronics",
        "quantity": 2,
        "price": "79228162514264337593543950335"
    }))
    .unwrap();
    ctx.state
        .products()
        .create(input, chrono::Utc::now())
        .await
        .unwrap();

    for path in ["/inventory", "/dashboard"] {
        let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_null_clears_optional_fields() {
    let ctx = TestContext::signed_in().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "product_id": "PRD-105",
            "sku": "SKU-105",
            "name": "Label Printer",
            "category": "Office Supplies",
            "quantity": 3,
            "price": "89.00",
            "location": "Shelf B"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/products/{id}")))
        .json(&json!({ "sku": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert!(updated["data"]["sku"].is_null());
    assert_eq!(updated["data"]["location"], "Shelf B");
}
