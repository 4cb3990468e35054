//! Account management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use tally_core::models::{Account, NewAccount, UpdateAccount};

/// GET /api/accounts - List the caller's accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Account>>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let accounts = state.db.list_accounts(user.id)?;

    // Audit log - read access
    state.db.log_audit(
        &user.email,
        "list",
        Some("account"),
        None,
        Some(&format!("count={}", accounts.len())),
    )?;

    Ok(Json(accounts))
}

/// GET /api/accounts/:id - Get a single account
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Account>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let account = state
        .db
        .get_account(user.id, id)?
        .ok_or_else(|| AppError::not_found(&format!("Account {} not found", id)))?;

    state
        .db
        .log_audit(&user.email, "get", Some("account"), Some(id), None)?;

    Ok(Json(account))
}

/// POST /api/accounts - Create an account
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Account>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: NewAccount = read_json(request.into_body()).await?;

    let account = state.db.create_account(user.id, &req)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("account"),
        Some(account.id),
        Some(&format!("name={}, type={}", account.name, account.account_type)),
    )?;

    Ok(Json(account))
}

/// PUT /api/accounts/:id - Update an account
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Account>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateAccount = read_json(request.into_body()).await?;

    let account = state
        .db
        .update_account(user.id, id, &req)?
        .ok_or_else(|| AppError::not_found(&format!("Account {} not found", id)))?;

    state
        .db
        .log_audit(&user.email, "update", Some("account"), Some(id), None)?;

    Ok(Json(account))
}

/// DELETE /api/accounts/:id - Delete an account and its transactions
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    if !state.db.delete_account(user.id, id)? {
        return Err(AppError::not_found(&format!("Account {} not found", id)));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("account"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
