//! Domain models for the cart service.
//!
//! These are validated domain objects, separate from the `FromRow` row types
//! that live next to the repository queries.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem, CartLine};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::{User, UserSummary};
