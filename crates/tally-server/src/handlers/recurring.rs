//! Recurring transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use tally_core::models::{NewRecurringTransaction, RecurringTransaction, UpdateRecurringTransaction};

/// GET /api/recurring - List recurring transactions
pub async fn list_recurring(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<RecurringTransaction>>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let recurring = state.db.list_recurring_transactions(user.id)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("recurring_transaction"),
        None,
        Some(&format!("count={}", recurring.len())),
    )?;

    Ok(Json(recurring))
}

/// POST /api/recurring - Create a recurring transaction
pub async fn create_recurring(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<RecurringTransaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: NewRecurringTransaction = read_json(request.into_body()).await?;

    let recurring = state.db.create_recurring_transaction(user.id, &req)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("recurring_transaction"),
        Some(recurring.id),
        Some(&format!(
            "amount={}, frequency={}",
            recurring.amount, recurring.frequency
        )),
    )?;

    Ok(Json(recurring))
}

/// PUT /api/recurring/:id - Update a recurring transaction
pub async fn update_recurring(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<RecurringTransaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateRecurringTransaction = read_json(request.into_body()).await?;

    let recurring = state
        .db
        .update_recurring_transaction(user.id, id, &req)?
        .ok_or_else(|| AppError::not_found(&format!("Recurring transaction {} not found", id)))?;

    state.db.log_audit(
        &user.email,
        "update",
        Some("recurring_transaction"),
        Some(id),
        Some(&format!("status={}", recurring.status)),
    )?;

    Ok(Json(recurring))
}

/// DELETE /api/recurring/:id - Delete a recurring transaction
pub async fn delete_recurring(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    if !state.db.delete_recurring_transaction(user.id, id)? {
        return Err(AppError::not_found(&format!(
            "Recurring transaction {} not found",
            id
        )));
    }

    state.db.log_audit(
        &user.email,
        "delete",
        Some("recurring_transaction"),
        Some(id),
        None,
    )?;

    Ok(Json(SuccessResponse { success: true }))
}
