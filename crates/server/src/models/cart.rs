//! Cart domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use copper_kettle_core::{CartItemId, ProductId, UserId};

use super::Product;

/// One cart row linking a user, a product, and a quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique cart row ID.
    pub id: CartItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Number of units. Always >= 1.
    pub quantity: i32,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A cart row joined with its product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    /// Price of this line: `product.price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.item.quantity)
    }
}

/// A user's full cart with its request-time total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartLine>,
    /// Sum of `price * quantity` over all lines.
    pub total: Decimal,
}

impl Cart {
    /// Build a cart from its lines, computing the total.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Self { items, total }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use copper_kettle_core::{CartItemId, ProductId, UserId};

    use super::*;

    fn line(product_id: i32, price: &str, quantity: i32) -> CartLine {
        let now = Utc::now();
        CartLine {
            item: CartItem {
                id: CartItemId::new(product_id),
                user_id: UserId::new(1),
                product_id: ProductId::new(product_id),
                quantity,
                created_at: now,
                updated_at: now,
            },
            product: Product {
                id: ProductId::new(product_id),
                name: format!("product-{product_id}"),
                price: price.parse().unwrap(),
                stock: 100,
                category: "kitchen".to_string(),
                image: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[test]
    fn test_line_total() {
        let line = line(1, "19.99", 3);
        assert_eq!(line.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let cart = Cart::from_lines(vec![line(1, "19.99", 2), line(2, "5.50", 1)]);
        // 39.98 + 5.50
        assert_eq!(cart.total, Decimal::new(4548, 2));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::from_lines(Vec::new());
        assert_eq!(cart.total, Decimal::ZERO);
        assert!(cart.items.is_empty());
    }
}
