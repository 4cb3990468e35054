//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use super::{read_json, resolve_month, MonthQuery};
use crate::{current_user, AppError, AppState, SuccessResponse};
use tally_core::models::{Budget, NewBudget, UpdateBudget};

/// GET /api/budgets - List budgets for a month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
    request: Request,
) -> Result<Json<Vec<Budget>>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let month = resolve_month(params.month.as_deref())?;

    let budgets = state.db.list_budgets(user.id, &month)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("budget"),
        None,
        Some(&format!("month={}, count={}", month, budgets.len())),
    )?;

    Ok(Json(budgets))
}

/// POST /api/budgets - Create a budget
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: NewBudget = read_json(request.into_body()).await?;

    let budget = state.db.create_budget(user.id, &req)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("budget"),
        Some(budget.id),
        Some(&format!(
            "category={}, limit={}, month={}",
            budget.category, budget.limit, budget.month
        )),
    )?;

    Ok(Json(budget))
}

/// PUT /api/budgets/:id - Update a budget
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateBudget = read_json(request.into_body()).await?;

    let budget = state
        .db
        .update_budget(user.id, id, &req)?
        .ok_or_else(|| AppError::not_found(&format!("Budget {} not found", id)))?;

    state
        .db
        .log_audit(&user.email, "update", Some("budget"), Some(id), None)?;

    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    if !state.db.delete_budget(user.id, id)? {
        return Err(AppError::not_found(&format!("Budget {} not found", id)));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("budget"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
