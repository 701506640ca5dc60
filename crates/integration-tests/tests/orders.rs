//! Integration tests for placing and listing orders.
//!
//! These tests require a running `PostgreSQL` database reachable through
//! `TEST_DATABASE_URL`.
//!
//! Run with: cargo test -p orderdesk-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use orderdesk_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn order_payload() -> Value {
    json!({
        "name": "Ada Lovelace",
        "address": "12 Analytical Way",
        "city": "London",
        "zip": "N1 9GU",
        "state": "LDN",
        "phone": "+447700900123",
        "email": "ada@example.com",
        "orderdetails": {"sku": "A1", "qty": 2}
    })
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_place_order_then_list() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.post_json("/place-order", &order_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"status": "success", "order_id": 1}));

    let (status, body) = ctx.get_json("/orders").await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);

    let order = &orders[0];
    assert_eq!(order["id"], 1);
    assert_eq!(order["name"], "Ada Lovelace");
    assert_eq!(order["city"], "London");
    assert_eq!(order["phone"], "+447700900123");
    assert_eq!(order["orderdetails"], r#"{"sku":"A1","qty":2}"#);
    assert!(order["orderdate"].is_string());

    let keys: Vec<&str> = order.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "id",
            "name",
            "address",
            "city",
            "zip",
            "state",
            "orderdate",
            "phone",
            "email",
            "orderdetails"
        ]
    );
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_place_order_sends_confirmation_to_order_phone() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.post_json("/place-order", &order_payload()).await;
    assert_eq!(status, StatusCode::CREATED);

    let notifications = ctx.notifications.lock().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["to"], "+447700900123");
    assert_eq!(notifications[0]["type"], "template");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_order_ids_increase() {
    let ctx = TestContext::new().await;

    let (_, first) = ctx.post_json("/place-order", &order_payload()).await;
    let (_, second) = ctx.post_json("/place-order", &order_payload()).await;

    assert_eq!(first["order_id"], 1);
    assert_eq!(second["order_id"], 2);
    assert_eq!(ctx.order_count().await, 2);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_missing_field_creates_no_order() {
    let ctx = TestContext::new().await;

    let mut payload = order_payload();
    payload.as_object_mut().unwrap().remove("city");

    let (status, body) = ctx.post_json("/place-order", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required field: city"}));
    assert_eq!(ctx.order_count().await, 0);
    assert_eq!(ctx.notification_count(), 0);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_provider_failure_does_not_fail_order() {
    let ctx = TestContext::with_provider_status(StatusCode::INTERNAL_SERVER_ERROR).await;

    let (status, body) = ctx.post_json("/place-order", &order_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(ctx.order_count().await, 1);
    assert_eq!(ctx.notification_count(), 1);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_null_phone_is_stored_and_skips_confirmation() {
    let ctx = TestContext::new().await;

    let mut payload = order_payload();
    payload["phone"] = Value::Null;

    let (status, _) = ctx.post_json("/place-order", &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, orders) = ctx.get_json("/orders").await;
    assert_eq!(orders[0]["phone"], Value::Null);
    assert_eq!(ctx.notification_count(), 0);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_list_orders_empty() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get_json("/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let response = ctx.client.post(ctx.url("/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_place_order_with_bigint_ids() {
    let ctx = TestContext::new().await;
    sqlx::query("ALTER TABLE orders ALTER COLUMN id TYPE BIGINT")
        .execute(&ctx.pool)
        .await
        .unwrap();
    sqlx::query("ALTER SEQUENCE orders_id_seq AS BIGINT")
        .execute(&ctx.pool)
        .await
        .unwrap();
    sqlx::query("SELECT setval(pg_get_serial_sequence('orders', 'id'), 3000000000, false)")
        .execute(&ctx.pool)
        .await
        .unwrap();

    let (status, body) = ctx.post_json("/place-order", &order_payload()).await;
    let (_, orders) = ctx.get_json("/orders").await;

    sqlx::query("TRUNCATE orders RESTART IDENTITY")
        .execute(&ctx.pool)
        .await
        .unwrap();
    sqlx::query("ALTER SEQUENCE orders_id_seq AS INTEGER")
        .execute(&ctx.pool)
        .await
        .unwrap();
    sqlx::query("ALTER TABLE orders ALTER COLUMN id TYPE INTEGER")
        .execute(&ctx.pool)
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"status": "success", "order_id": 3_000_000_000_i64}));
    assert_eq!(orders[0]["id"], 3_000_000_000_i64);
}
