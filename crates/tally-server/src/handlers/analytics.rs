//! Analytics handlers: dashboard, insights, breakdowns, and projections

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use super::{parse_date, resolve_month, DateRangeQuery, MonthQuery};
use crate::{current_user, AppError, AppState};
use tally_core::analytics::{CategorySpending, FinancialInsight, MonthlyStats};
use tally_core::period::day_range_bounds;
use tally_core::{DashboardSummary, ExpenseEstimate};

/// Most months an estimate may look back over
const MAX_ESTIMATE_MONTHS: usize = 24;

/// GET /api/analytics/dashboard - Dashboard figures for a month
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
    request: Request,
) -> Result<Json<DashboardSummary>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let month = resolve_month(params.month.as_deref())?;

    let summary = state.db.dashboard_summary(user.id, &month)?;

    state.db.log_audit(
        &user.email,
        "view",
        Some("dashboard"),
        None,
        Some(&format!("month={}", month)),
    )?;

    Ok(Json(summary))
}

/// GET /api/analytics/insights - Insights for a month
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
    request: Request,
) -> Result<Json<Vec<FinancialInsight>>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let month = resolve_month(params.month.as_deref())?;

    let insights = state.db.financial_insights(user.id, &month)?;

    state.db.log_audit(
        &user.email,
        "view",
        Some("insights"),
        None,
        Some(&format!("month={}, count={}", month, insights.len())),
    )?;

    Ok(Json(insights))
}

/// GET /api/analytics/category-spending - Expense breakdown by category
pub async fn get_category_spending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeQuery>,
    request: Request,
) -> Result<Json<Vec<CategorySpending>>, AppError> {
    let user = current_user(&state.db, request.headers())?;

    let from = parse_date(&params.from)?;
    let to = parse_date(&params.to)?;
    if from > to {
        return Err(AppError::bad_request("'from' must not be after 'to'"));
    }
    let (start, end) = day_range_bounds(from, to)?;

    let spending = state.db.category_spending(user.id, start, end)?;

    state.db.log_audit(
        &user.email,
        "view",
        Some("category_spending"),
        None,
        Some(&format!("from={}, to={}", params.from, params.to)),
    )?;

    Ok(Json(spending))
}

/// GET /api/analytics/monthly-stats - Income and expense totals for a month
pub async fn get_monthly_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
    request: Request,
) -> Result<Json<MonthlyStats>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let month = resolve_month(params.month.as_deref())?;

    let stats = state.db.monthly_stats(user.id, &month)?;

    state.db.log_audit(
        &user.email,
        "view",
        Some("monthly_stats"),
        None,
        Some(&format!("month={}", month)),
    )?;

    Ok(Json(stats))
}

/// Query parameters for an expense estimate
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    pub month: Option<String>,
    #[serde(default = "default_estimate_months")]
    pub months: usize,
}

fn default_estimate_months() -> usize {
    3
}

/// GET /api/analytics/estimate - Projected expenses for a month
pub async fn get_estimate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EstimateQuery>,
    request: Request,
) -> Result<Json<ExpenseEstimate>, AppError> {
    let user = current_user(&state.db, request.headers())?;
    let month = resolve_month(params.month.as_deref())?;
    let months = params.months.clamp(1, MAX_ESTIMATE_MONTHS);

    let today = chrono::Utc::now().date_naive();
    let estimate = state.db.estimate_expenses(user.id, &month, months, today)?;

    state.db.log_audit(
        &user.email,
        "view",
        Some("expense_estimate"),
        None,
        Some(&format!("month={}, months={}", month, months)),
    )?;

    Ok(Json(estimate))
}
