//! Authentication-related handlers

use std::sync::Arc;

use axum::extract::Request;
use axum::{extract::State, Json};
use serde::Serialize;

use crate::{current_user, AppError, AppState};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// Stored user ID
    pub id: i64,
    /// The authenticated user's email or identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
}

/// GET /api/me - The currently authenticated user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<MeResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let auth_method = if user.email == "api-key" {
        "api_key"
    } else if user.email == "local-dev" {
        "none"
    } else if user.email.contains('@') {
        "cloudflare_header"
    } else {
        "unknown"
    };

    Ok(Json(MeResponse {
        id: user.id,
        user: user.email,
        auth_method: auth_method.to_string(),
    }))
}
