//! Cart route handlers.
//!
//! All endpoints require an authenticated session and answer with the
//! standard JSON envelope. Path IDs are parsed by hand so a malformed ID is
//! a 400 envelope, not a bare framework rejection.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use copper_kettle_core::{CartItemId, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{Cart, CartLine, UserSummary};
use crate::response::ApiResponse;
use crate::services::CartService;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i32,
}

/// Query parameters for the cart view.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    /// Admin-only: view the cart of the user with this email.
    pub user_email: Option<String>,
}

/// Parse a path segment as a cart item ID.
///
/// The original API contract promises a 400 "Invalid cart item id" for
/// non-numeric IDs rather than a 404.
fn parse_item_id(raw: &str) -> Result<CartItemId> {
    raw.parse::<i32>()
        .map(CartItemId::new)
        .map_err(|_| AppError::BadRequest("Invalid cart item id".to_string()))
}

/// Add a product to the cart.
///
/// POST /cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CartLine>>)> {
    let quantity = req.quantity.unwrap_or(1);

    let line = CartService::new(state.pool())
        .add_item(user.id, req.product_id, quantity)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product added to cart", line)),
    ))
}

/// Get the cart with its total.
///
/// GET /cart
///
/// Admins may pass `?userEmail=` to view another user's cart.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<CartQuery>,
) -> Result<Json<ApiResponse<Cart>>> {
    let cart = CartService::new(state.pool())
        .get_cart(&user, query.user_email.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok("Cart retrieved successfully", cart)))
}

/// Update a cart item's quantity.
///
/// PUT /cart/{id}
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Json<ApiResponse<CartLine>>> {
    let item_id = parse_item_id(&id)?;

    let line = CartService::new(state.pool())
        .update_item(user.id, item_id, req.quantity)
        .await?;

    Ok(Json(ApiResponse::ok("Cart item updated", line)))
}

/// Remove one cart item.
///
/// DELETE /cart/{id}
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>> {
    let item_id = parse_item_id(&id)?;

    CartService::new(state.pool())
        .remove_item(user.id, item_id)
        .await?;

    Ok(Json(ApiResponse::ok("Cart item removed", json!({}))))
}

/// Clear the entire cart.
///
/// DELETE /cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ApiResponse<Value>>> {
    CartService::new(state.pool()).clear(user.id).await?;

    Ok(Json(ApiResponse::ok("Cart cleared", json!({}))))
}

/// List all users for the admin cart-view dropdown.
///
/// GET /cart/users/list (admin only)
#[instrument(skip(state, admin), fields(user_id = %admin.id))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>> {
    let users = CartService::new(state.pool()).list_users().await?;

    Ok(Json(ApiResponse::ok("Users retrieved successfully", users)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_id_numeric() {
        assert!(parse_item_id("42").is_ok());
    }

    #[test]
    fn test_parse_item_id_rejects_garbage() {
        assert!(matches!(
            parse_item_id("abc"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(parse_item_id(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_item_id("1.5"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_add_request_defaults_quantity() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"productId": 3}"#).expect("valid body");
        assert_eq!(req.quantity, None);
        assert_eq!(req.product_id, ProductId::new(3));
    }

    #[test]
    fn test_add_request_camel_case() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"productId": 3, "quantity": 2}"#).expect("valid body");
        assert_eq!(req.quantity, Some(2));
    }
}
