//! Business logic services.
//!
//! Services own the validation sequences (stock checks, ownership checks,
//! role checks) and delegate persistence to the repositories in [`crate::db`].

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
