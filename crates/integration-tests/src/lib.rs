//! Integration tests for Copper Kettle.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p copper-kettle-cli -- migrate
//! cargo run -p copper-kettle-cli -- seed products
//!
//! # Start the server
//! cargo run -p copper-kettle-server
//!
//! # Run integration tests (ignored by default)
//! cargo test -p copper-kettle-integration-tests -- --ignored
//! ```
//!
//! Tests target a running server at `CART_BASE_URL`
//! (default: `http://localhost:3000`).

use reqwest::Client;

/// Base URL for the cart API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CART_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session cookie from
/// login is replayed on subsequent requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique email so repeated test runs don't collide on the
/// users table's unique constraint.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}
