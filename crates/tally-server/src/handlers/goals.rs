//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};
use serde::Deserialize;

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use tally_core::models::{NewSavingsGoal, SavingsGoal, UpdateSavingsGoal};

/// GET /api/goals - List savings goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<SavingsGoal>>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let goals = state.db.list_savings_goals(user.id)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("savings_goal"),
        None,
        Some(&format!("count={}", goals.len())),
    )?;

    Ok(Json(goals))
}

/// POST /api/goals - Create a savings goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: NewSavingsGoal = read_json(request.into_body()).await?;

    let goal = state.db.create_savings_goal(user.id, &req)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("savings_goal"),
        Some(goal.id),
        Some(&format!("name={}, target={}", goal.name, goal.target_amount)),
    )?;

    Ok(Json(goal))
}

/// PUT /api/goals/:id - Update a savings goal
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: UpdateSavingsGoal = read_json(request.into_body()).await?;

    let goal = state
        .db
        .update_savings_goal(user.id, id, &req)?
        .ok_or_else(|| AppError::not_found(&format!("Savings goal {} not found", id)))?;

    state.db.log_audit(
        &user.email,
        "update",
        Some("savings_goal"),
        Some(id),
        Some(&format!("status={}", goal.status)),
    )?;

    Ok(Json(goal))
}

/// Request body for recording goal progress
#[derive(Debug, Deserialize)]
pub struct GoalProgressRequest {
    pub current_amount: i64,
}

/// PUT /api/goals/:id/progress - Set the amount saved so far
pub async fn update_goal_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let req: GoalProgressRequest = read_json(request.into_body()).await?;

    let goal = state
        .db
        .update_goal_progress(user.id, id, req.current_amount)?
        .ok_or_else(|| AppError::not_found(&format!("Savings goal {} not found", id)))?;

    state.db.log_audit(
        &user.email,
        "update",
        Some("savings_goal_progress"),
        Some(id),
        Some(&format!(
            "current={}, target={}",
            goal.current_amount, goal.target_amount
        )),
    )?;

    Ok(Json(goal))
}

/// DELETE /api/goals/:id - Delete a savings goal
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    if !state.db.delete_savings_goal(user.id, id)? {
        return Err(AppError::not_found(&format!("Savings goal {} not found", id)));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("savings_goal"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
