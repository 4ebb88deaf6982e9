//! User registration route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::models::User;
use crate::response::ApiResponse;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Register a new user.
///
/// POST /users
///
/// Rejects duplicate emails with a 400 envelope. The created user (without
/// the password hash) is returned in `data`.
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    let user = AuthService::new(state.pool())
        .register(&req.email, &req.name, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created", user)),
    ))
}
