//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{parse_date, read_json, DateRangeQuery};
use crate::{current_user, AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use tally_core::models::{Category, NewTransaction, Transaction, UpdateTransaction};
use tally_core::period::day_range_bounds;
use tally_core::resolve_category;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<Transaction>,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
    request: Request,
) -> Result<Json<TransactionResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let transactions = state.db.list_transactions(user.id, limit, offset)?;

    // Audit log - read access
    state.db.log_audit(
        &user.email,
        "list",
        Some("transaction"),
        None,
        Some(&format!(
            "limit={}, offset={}, returned={}",
            limit,
            offset,
            transactions.len()
        )),
    )?;

    Ok(Json(TransactionResponse {
        transactions,
        limit,
        offset,
    }))
}

/// GET /api/transactions/range - Transactions between two dates
pub async fn list_transactions_in_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeQuery>,
    request: Request,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let from = parse_date(&params.from)?;
    let to = parse_date(&params.to)?;
    if from > to {
        return Err(AppError::bad_request("'from' must not be after 'to'"));
    }
    let (start, end) = day_range_bounds(from, to)?;

    let transactions = state.db.list_transactions_in_range(user.id, start, end)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("transaction"),
        None,
        Some(&format!(
            "from={}, to={}, returned={}",
            params.from,
            params.to,
            transactions.len()
        )),
    )?;

    Ok(Json(transactions))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let transaction = state
        .db
        .get_transaction(user.id, id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    state
        .db
        .log_audit(&user.email, "get", Some("transaction"), Some(id), None)?;

    Ok(Json(transaction))
}

/// POST /api/transactions - Record a transaction
///
/// Without an explicit category the configured categorizer picks one.
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: NewTransaction = read_json(request.into_body()).await?;
    req.validate()?;

    let categorization = resolve_category(
        &state.categorizer,
        req.category,
        req.description.as_deref(),
        req.amount,
        req.transaction_type,
    )
    .await?;

    let transaction = state.db.create_transaction(user.id, &req, categorization)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("transaction"),
        Some(transaction.id),
        Some(&format!(
            "amount={}, category={}, automatic={}, confidence={:.2}",
            transaction.amount,
            transaction.category,
            categorization.automatic,
            categorization.confidence
        )),
    )?;

    Ok(Json(transaction))
}

/// PUT /api/transactions/:id - Partially update a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateTransaction = read_json(request.into_body()).await?;

    let transaction = state
        .db
        .update_transaction(user.id, id, &req)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    state
        .db
        .log_audit(&user.email, "update", Some("transaction"), Some(id), None)?;

    Ok(Json(transaction))
}

/// Request body for overriding a transaction's category
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category: Category,
}

/// PUT /api/transactions/:id/category - Override the category
pub async fn update_transaction_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateCategoryRequest = read_json(request.into_body()).await?;

    let transaction = state
        .db
        .update_transaction_category(user.id, id, req.category)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    state.db.log_audit(
        &user.email,
        "update",
        Some("transaction_category"),
        Some(id),
        Some(&format!("category={}", req.category)),
    )?;

    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    if !state.db.delete_transaction(user.id, id)? {
        return Err(AppError::not_found(&format!("Transaction {} not found", id)));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("transaction"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
