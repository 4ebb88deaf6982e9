//! Integration tests for the cart API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded product catalog (`ck-cli seed products`)
//! - The server running (`cargo run -p copper-kettle-server`)
//!
//! Run with: `cargo test -p copper-kettle-integration-tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use copper_kettle_integration_tests::{base_url, client, unique_email};

/// Register and log in a fresh user; returns the authenticated client.
async fn authenticated_client() -> Client {
    let client = client();
    let base = base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({
            "email": email,
            "name": "Test Shopper",
            "password": "integration-test-pw",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({
            "email": email,
            "password": "integration-test-pw",
        }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    client
}

/// Fetch the first seeded product's ID via the caller's empty cart... there
/// is no product listing endpoint, so tests assume product 1 exists from
/// `ck-cli seed products`.
const SEEDED_PRODUCT_ID: i32 = 1;

async fn envelope(resp: reqwest::Response) -> Value {
    resp.json().await.expect("Failed to parse envelope")
}

// ============================================================================
// Auth & Envelope Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cart_requires_authentication() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to get cart");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = envelope(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_duplicate_registration_rejected() {
    let client = client();
    let base = base_url();
    let email = unique_email();

    let body = json!({
        "email": email,
        "name": "Dup Shopper",
        "password": "integration-test-pw",
    });

    let resp = client
        .post(format!("{base}/users"))
        .json(&body)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/users"))
        .json(&body)
        .send()
        .await
        .expect("Failed to re-register");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_login_with_wrong_password() {
    let client = client();
    let base = base_url();

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({
            "email": unique_email(),
            "password": "definitely-wrong",
        }))
        .send()
        .await
        .expect("Failed to login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Cart CRUD Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_add_and_merge_cart_item() {
    let client = authenticated_client().await;
    let base = base_url();

    // First add creates a row
    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID, "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = envelope(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["quantity"], 1);

    // Second add merges into the same row instead of duplicating it
    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID, "quantity": 2}))
        .send()
        .await
        .expect("Failed to re-add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["quantity"], 3);

    // The cart has exactly one line for the product
    let resp = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = envelope(resp).await;
    let items = body["data"]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_merge_rejects_insufficient_stock() {
    let client = authenticated_client().await;
    let base = base_url();

    // Product 1 is seeded with stock 25; 20 alone fits
    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID, "quantity": 20}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // A second add of 20 would merge to 40, which exceeds stock
    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID, "quantity": 20}))
        .send()
        .await
        .expect("Failed to re-add to cart");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Insufficient stock");

    // The rejected merge leaves the existing row untouched
    let resp = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = envelope(resp).await;
    let items = body["data"]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 20);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cart_total_matches_lines() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID, "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = envelope(resp).await;

    let items = body["data"]["items"].as_array().expect("items array");
    let price: f64 = items[0]["product"]["price"]
        .as_str()
        .expect("price string")
        .parse()
        .expect("numeric price");
    let total: f64 = body["data"]["total"]
        .as_str()
        .expect("total string")
        .parse()
        .expect("numeric total");
    assert!((total - price * 2.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_update_remove_and_clear() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID}))
        .send()
        .await
        .expect("Failed to add to cart");
    let body = envelope(resp).await;
    let item_id = body["data"]["id"].as_i64().expect("item id");

    // Update quantity
    let resp = client
        .put(format!("{base}/cart/{item_id}"))
        .json(&json!({"quantity": 4}))
        .send()
        .await
        .expect("Failed to update");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["quantity"], 4);

    // Quantity below 1 is rejected
    let resp = client
        .put(format!("{base}/cart/{item_id}"))
        .json(&json!({"quantity": 0}))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Remove the item
    let resp = client
        .delete(format!("{base}/cart/{item_id}"))
        .send()
        .await
        .expect("Failed to remove");
    assert_eq!(resp.status(), StatusCode::OK);

    // Removing again is a 404
    let resp = client
        .delete(format!("{base}/cart/{item_id}"))
        .send()
        .await
        .expect("Failed to re-remove");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Clear is idempotent and leaves an empty cart
    let resp = client
        .delete(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to clear");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = envelope(resp).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_invalid_cart_item_id_is_400() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .delete(format!("{base}/cart/not-a-number"))
        .send()
        .await
        .expect("Failed to send delete");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = envelope(resp).await;
    assert_eq!(body["message"], "Invalid cart item id");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cannot_touch_another_users_item() {
    let owner = authenticated_client().await;
    let base = base_url();

    let resp = owner
        .post(format!("{base}/cart"))
        .json(&json!({"productId": SEEDED_PRODUCT_ID}))
        .send()
        .await
        .expect("Failed to add to cart");
    let body = envelope(resp).await;
    let item_id = body["data"]["id"].as_i64().expect("item id");

    // A different user gets 403 on someone else's row
    let intruder = authenticated_client().await;
    let resp = intruder
        .put(format!("{base}/cart/{item_id}"))
        .json(&json!({"quantity": 1}))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = intruder
        .delete(format!("{base}/cart/{item_id}"))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = envelope(resp).await;
    assert_eq!(body["message"], "Access denied");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_product_is_404() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/cart"))
        .json(&json!({"productId": 999_999}))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = envelope(resp).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_users_list_is_admin_only() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .get(format!("{base}/cart/users/list"))
        .send()
        .await
        .expect("Failed to get users list");

    // Freshly registered users are customers
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
