//! Cart service.
//!
//! Owns the per-operation validation sequence: product lookup, stock
//! comparison, ownership comparison. Adding a product already in the cart
//! merges quantities into the existing row; the stock check always applies
//! to the quantity that would end up in the row.
//!
//! The stock check is read-then-write without row locking. A concurrent
//! update between the check and the write can oversell; reservation design
//! is out of scope for this service.

use sqlx::PgPool;
use tracing::instrument;

use copper_kettle_core::{CartItemId, Email, ProductId, UserId};

use crate::db::{CartRepository, ProductRepository, RepositoryError, UserRepository};
use crate::models::{Cart, CartLine, CurrentUser, UserSummary};

/// Errors that can occur during cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Requested user does not exist (admin cart lookup by email).
    #[error("user not found")]
    UserNotFound,

    /// Cart row does not exist.
    #[error("cart item not found")]
    ItemNotFound,

    /// Requested quantity exceeds the product's stock.
    #[error("insufficient stock")]
    InsufficientStock,

    /// Quantity must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Caller does not own the cart row.
    #[error("access denied")]
    Forbidden,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// Add a product to a user's cart.
    ///
    /// If the product is already in the cart, its quantity is incremented
    /// rather than a second row being created. The stock check applies to
    /// the merged quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` for an unknown product,
    /// `CartError::InvalidQuantity` for a quantity below 1, and
    /// `CartError::InsufficientStock` when the (merged) quantity exceeds
    /// the product's stock.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLine, CartError> {
        validate_quantity(quantity)?;

        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        ensure_stock(product.stock, quantity)?;

        let item = match self.carts.find_item(user_id, product_id).await? {
            Some(existing) => {
                let merged = merged_quantity(existing.quantity, quantity)
                    .ok_or(CartError::InsufficientStock)?;
                ensure_stock(product.stock, merged)?;
                self.carts.set_quantity(existing.id, merged).await?
            }
            None => self.carts.insert_item(user_id, product_id, quantity).await?,
        };

        // Re-fetch joined with the product for the response payload
        self.carts
            .get_line(item.id)
            .await?
            .ok_or(CartError::ItemNotFound)
    }

    /// Get a user's cart with its total.
    ///
    /// Admins may pass `user_email` to view another user's cart; for
    /// everyone else the parameter is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UserNotFound` if an admin requests a cart for an
    /// email that doesn't match any user.
    #[instrument(skip(self, current), fields(user_id = %current.id))]
    pub async fn get_cart(
        &self,
        current: &CurrentUser,
        user_email: Option<&str>,
    ) -> Result<Cart, CartError> {
        let mut user_id = current.id;

        if let Some(email) = user_email
            && current.role.is_admin()
        {
            // An unparseable email cannot match any user
            let email = Email::parse(email).map_err(|_| CartError::UserNotFound)?;
            let user = self
                .users
                .get_by_email(&email)
                .await?
                .ok_or(CartError::UserNotFound)?;
            user_id = user.id;
        }

        let lines = self.carts.list_for_user(user_id).await?;
        Ok(Cart::from_lines(lines))
    }

    /// Update the quantity on a cart row owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a quantity below 1,
    /// `CartError::ItemNotFound` for a missing row, `CartError::Forbidden`
    /// when the row belongs to another user, and
    /// `CartError::InsufficientStock` when stock is exceeded.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<CartLine, CartError> {
        validate_quantity(quantity)?;

        let line = self
            .carts
            .get_line(item_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        if line.item.user_id != user_id {
            return Err(CartError::Forbidden);
        }

        ensure_stock(line.product.stock, quantity)?;

        self.carts.set_quantity(item_id, quantity).await?;

        self.carts
            .get_line(item_id)
            .await?
            .ok_or(CartError::ItemNotFound)
    }

    /// Remove a cart row owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` for a missing row and
    /// `CartError::Forbidden` when the row belongs to another user.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> Result<(), CartError> {
        let line = self
            .carts
            .get_line(item_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        if line.item.user_id != user_id {
            return Err(CartError::Forbidden);
        }

        self.carts.delete_item(item_id).await?;
        Ok(())
    }

    /// Clear a user's entire cart. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the delete fails.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<u64, CartError> {
        Ok(self.carts.clear_for_user(user_id).await?)
    }

    /// List all users for the admin cart-view dropdown.
    ///
    /// The admin role check happens in the route layer; this just queries.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, CartError> {
        Ok(self.users.list_summaries().await?)
    }
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Reject quantities below 1.
const fn validate_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }
    Ok(())
}

/// Reject quantities the product cannot cover.
const fn ensure_stock(stock: i32, quantity: i32) -> Result<(), CartError> {
    if stock < quantity {
        return Err(CartError::InsufficientStock);
    }
    Ok(())
}

/// Merge an added quantity into an existing row's quantity.
///
/// `None` on i32 overflow, which no stock level can cover anyway.
const fn merged_quantity(existing: i32, added: i32) -> Option<i32> {
    existing.checked_add(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(CartError::InvalidQuantity)
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(CartError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_ensure_stock() {
        assert!(ensure_stock(10, 10).is_ok());
        assert!(ensure_stock(10, 1).is_ok());
        assert!(matches!(
            ensure_stock(10, 11),
            Err(CartError::InsufficientStock)
        ));
        assert!(matches!(
            ensure_stock(0, 1),
            Err(CartError::InsufficientStock)
        ));
    }

    #[test]
    fn test_merged_quantity() {
        assert_eq!(merged_quantity(2, 3), Some(5));
        assert_eq!(merged_quantity(i32::MAX, 1), None);
    }
}
