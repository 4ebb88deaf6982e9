//! Login/logout route handlers.
//!
//! Login verifies credentials and stores a [`CurrentUser`] in the session;
//! logout clears it. Both answer with the standard JSON envelope.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::response::ApiResponse;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<CurrentUser>>> {
    let user = AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
        role: user.role,
    };
    set_current_user(&session, &current).await?;

    Ok(Json(ApiResponse::ok("Login successful", current)))
}

/// Logout the current user.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<ApiResponse<Value>>> {
    clear_current_user(&session).await?;

    Ok(Json(ApiResponse::ok("Logged out", json!({}))))
}
