//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use copper_kettle_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price. Decimal, never a float.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock: i32,
    /// Category label (e.g., "kitchen").
    pub category: String,
    /// Optional image URL.
    pub image: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
