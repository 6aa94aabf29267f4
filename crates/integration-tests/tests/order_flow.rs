//! Integration tests for order creation and the order read endpoints.
//!
//! No notification channels are configured here, so every fan-out comes
//! back all-failed while the orders themselves succeed. Channel delivery
//! is covered separately in `notification_fanout.rs`.

use serde_json::{Value, json};

use officebar_integration_tests::{TestApp, sample_items};

// =============================================================================
// Create Tests
// =============================================================================

#[tokio::test]
async fn test_create_order_returns_201_with_embedded_outcomes() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    let response = app
        .post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
        .await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Should be JSON");
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["order"]["id"], 1);
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["items"].as_array().map(Vec::len), Some(2));
    assert!(body["order"]["createdAt"].is_string());

    // Nothing configured, so nothing was sent; the order still succeeded.
    assert_eq!(body["notifications"]["totalSent"], 0);
    assert_eq!(body["notifications"]["telegram"]["success"], false);
    assert_eq!(body["notifications"]["discord"]["success"], false);
    assert_eq!(body["notifications"]["gmail"]["success"], false);
}

#[tokio::test]
async fn test_create_accepts_numeric_prices() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    let items = json!([
        { "drinkId": "espresso", "drinkName": "Espresso", "quantity": 1, "price": 0 },
    ]);
    let response = app
        .post_authed("/orders/create", &token, &json!({ "items": items }))
        .await;

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_empty_cart_is_400() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    let empty_items = app
        .post_authed("/orders/create", &token, &json!({ "items": [] }))
        .await;
    assert_eq!(empty_items.status(), 400);
    let body: Value = empty_items.json().await.expect("Should be JSON");
    assert_eq!(body["error"], "Cart cannot be empty");

    // A body with no items field at all gets the same rejection.
    let no_items = app.post_authed("/orders/create", &token, &json!({})).await;
    assert_eq!(no_items.status(), 400);
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/orders/create", &json!({ "items": sample_items() }))
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Should be JSON");
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn test_order_ids_count_up_from_one() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    for expected_id in 1..=3 {
        let body: Value = app
            .post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
            .await
            .json()
            .await
            .expect("Should be JSON");
        assert_eq!(body["order"]["id"], expected_id);
    }
}

#[tokio::test]
async fn test_order_lands_in_profile_history() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    app.post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
        .await;

    let body: Value = app
        .get_authed("/auth/me", &token)
        .await
        .json()
        .await
        .expect("Should be JSON");
    let history = body["user"]["orderHistory"]
        .as_array()
        .expect("history is an array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["orderId"], 1);
    assert_eq!(history[0]["totalPrice"], "0.00");
    assert_eq!(history[0]["items"].as_array().map(Vec::len), Some(2));
}

// =============================================================================
// Own Orders Tests
// =============================================================================

#[tokio::test]
async fn test_my_orders_lists_oldest_first() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    for _ in 0..2 {
        app.post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
            .await;
    }

    let body: Value = app
        .get_authed("/orders/my-orders", &token)
        .await
        .json()
        .await
        .expect("Should be JSON");
    let orders = body["orders"].as_array().expect("orders is an array");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], 1);
    assert_eq!(orders[1]["id"], 2);
    assert_eq!(orders[0]["totalPrice"], "0.00");
}

#[tokio::test]
async fn test_my_orders_excludes_other_employees() {
    let app = TestApp::spawn().await;
    let kim = app.signup("kim@office.test", "Kim", "Lee").await;
    let ana = app.signup("ana@office.test", "Ana", "Gomez").await;

    app.post_authed("/orders/create", &kim, &json!({ "items": sample_items() }))
        .await;

    let body: Value = app
        .get_authed("/orders/my-orders", &ana)
        .await
        .json()
        .await
        .expect("Should be JSON");
    assert_eq!(body["orders"], json!([]));
}

// =============================================================================
// Detail Tests
// =============================================================================

#[tokio::test]
async fn test_order_detail_for_owner() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;
    app.post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
        .await;

    let response = app.get_authed("/orders/1", &token).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Should be JSON");
    assert_eq!(body["order"]["id"], 1);
    assert_eq!(body["order"]["userName"], "Kim Lee");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["totalPrice"], "0.00");
    assert!(body["order"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_order_detail_cross_user_is_403() {
    let app = TestApp::spawn().await;
    let kim = app.signup("kim@office.test", "Kim", "Lee").await;
    let ana = app.signup("ana@office.test", "Ana", "Gomez").await;
    app.post_authed("/orders/create", &kim, &json!({ "items": sample_items() }))
        .await;

    let response = app.get_authed("/orders/1", &ana).await;

    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.expect("Should be JSON");
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_order_detail_unknown_id_is_404() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;

    for path in ["/orders/999", "/orders/not-a-number"] {
        let response = app.get_authed(path, &token).await;
        assert_eq!(response.status(), 404, "{path} should be a 404");
        let body: Value = response.json().await.expect("Should be JSON");
        assert_eq!(body["error"], "Order not found");
    }
}

// =============================================================================
// All Orders Tests
// =============================================================================

#[tokio::test]
async fn test_all_orders_lists_newest_first() {
    let app = TestApp::spawn().await;
    let kim = app.signup("kim@office.test", "Kim", "Lee").await;
    let ana = app.signup("ana@office.test", "Ana", "Gomez").await;

    app.post_authed("/orders/create", &kim, &json!({ "items": sample_items() }))
        .await;
    app.post_authed("/orders/create", &ana, &json!({ "items": sample_items() }))
        .await;
    app.post_authed("/orders/create", &kim, &json!({ "items": sample_items() }))
        .await;

    let body: Value = app
        .get_authed("/orders/admin/all", &ana)
        .await
        .json()
        .await
        .expect("Should be JSON");
    assert_eq!(body["totalOrders"], 3);

    let ids: Vec<i64> = body["orders"]
        .as_array()
        .expect("orders is an array")
        .iter()
        .map(|order| order["id"].as_i64().expect("id is a number"))
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_all_orders_carries_a_summary_line() {
    let app = TestApp::spawn().await;
    let token = app.signup("kim@office.test", "Kim", "Lee").await;
    app.post_authed("/orders/create", &token, &json!({ "items": sample_items() }))
        .await;

    let body: Value = app
        .get_authed("/orders/admin/all", &token)
        .await
        .json()
        .await
        .expect("Should be JSON");

    assert_eq!(
        body["orders"][0]["summary"],
        "Kim Lee ordered: 2x Latte, 1x Espresso"
    );
    assert_eq!(body["orders"][0]["userName"], "Kim Lee");
}

#[tokio::test]
async fn test_all_orders_requires_token() {
    let app = TestApp::spawn().await;

    let response = app.get("/orders/admin/all").await;

    assert_eq!(response.status(), 401);
}
