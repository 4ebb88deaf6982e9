//! Cart repository for database operations.
//!
//! Cart rows are unique per `(user_id, product_id)` pair; adding the same
//! product twice is a quantity update, not a second row. The listing queries
//! join `products` so handlers can return the line with its product in one
//! round trip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use copper_kettle_core::{CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartItem, CartLine, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for bare cart item queries.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: CartItemId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for cart item + product join queries.
///
/// Product columns are aliased with a `product_` prefix to avoid clashing
/// with the cart item's own columns.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    product_name: String,
    product_price: Decimal,
    product_stock: i32,
    product_category: String,
    product_image: Option<String>,
    product_created_at: DateTime<Utc>,
    product_updated_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            item: CartItem {
                id: CartItemId::new(row.id),
                user_id: UserId::new(row.user_id),
                product_id: ProductId::new(row.product_id),
                quantity: row.quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            product: Product {
                id: ProductId::new(row.product_id),
                name: row.product_name,
                price: row.product_price,
                stock: row.product_stock,
                category: row.product_category,
                image: row.product_image,
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
            },
        }
    }
}

/// Shared join projection for cart line queries.
const CART_LINE_COLUMNS: &str = r"
    ci.id, ci.user_id, ci.product_id, ci.quantity, ci.created_at, ci.updated_at,
    p.name       AS product_name,
    p.price      AS product_price,
    p.stock      AS product_stock,
    p.category   AS product_category,
    p.image      AS product_image,
    p.created_at AS product_created_at,
    p.updated_at AS product_updated_at
";

// =============================================================================
// Repository
// =============================================================================

/// Repository for cart item database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart lines with product details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows: Vec<CartLineRow> = sqlx::query_as(&format!(
            r"
            SELECT {CART_LINE_COLUMNS}
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.created_at DESC
            "
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartLine::from).collect())
    }

    /// Get one cart line by row ID, with product details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_line(&self, id: CartItemId) -> Result<Option<CartLine>, RepositoryError> {
        let row: Option<CartLineRow> = sqlx::query_as(&format!(
            r"
            SELECT {CART_LINE_COLUMNS}
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.id = $1
            "
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CartLine::from))
    }

    /// Find a user's cart row for a specific product, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let row: Option<CartItemRow> = sqlx::query_as(
            r"
            SELECT id, user_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    /// Insert a new cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a row for
    /// this product. Returns `RepositoryError::Database` for other errors.
    #[instrument(skip(self))]
    pub async fn insert_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let row: CartItemRow = sqlx::query_as(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id, quantity, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product already in cart".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(CartItem::from(row))
    }

    /// Set the quantity on an existing cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row no longer exists.
    /// Returns `RepositoryError::Database` for other errors.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let row: Option<CartItemRow> = sqlx::query_as(
            r"
            UPDATE cart_items
            SET quantity = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, product_id, quantity, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(CartItem::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete one cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row was deleted.
    /// Returns `RepositoryError::Database` for other errors.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: CartItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete all of a user's cart rows. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self))]
    pub async fn clear_for_user(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
