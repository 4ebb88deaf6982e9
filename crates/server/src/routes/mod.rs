//! HTTP route handlers for the cart server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database ping)
//!
//! # Users
//! POST /users               - Register a new user
//!
//! # Auth
//! POST /auth/login          - Login (sets session cookie)
//! POST /auth/logout         - Logout (clears session)
//!
//! # Cart (requires auth)
//! POST   /cart              - Add product to cart (merges quantities)
//! GET    /cart              - Get cart + total (admin: ?userEmail=)
//! PUT    /cart/{id}         - Update cart item quantity
//! DELETE /cart/{id}         - Remove cart item
//! DELETE /cart              - Clear entire cart
//! GET    /cart/users/list   - List users (admin only)
//! ```

pub mod auth;
pub mod cart;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add).get(cart::show).delete(cart::clear))
        .route("/{id}", axum::routing::put(cart::update).delete(cart::remove))
        .route("/users/list", get(cart::list_users))
}

/// Create all routes for the cart server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
}
