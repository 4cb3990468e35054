//! Loads a user's rows and hands them to the analytics engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::Database;
use crate::analytics::{
    calculate_category_spending, calculate_monthly_stats, calculate_total_balance,
    estimate_monthly_expenses, generate_budget_alerts, generate_financial_insights, BudgetAlert,
    CategorySpending, FinancialInsight, MonthlyStats,
};
use crate::error::Result;
use crate::models::GoalStatus;
use crate::period::{
    days_elapsed, days_in_month, format_month, month_bounds, previous_month, trailing_months,
};

/// Figures shown on the dashboard for one month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month: String,
    /// Sum of all account balances
    pub total_balance: i64,
    pub income: i64,
    pub expenses: i64,
    pub balance: i64,
    pub account_count: usize,
    pub budget_alerts: Vec<BudgetAlert>,
    pub category_spending: Vec<CategorySpending>,
    /// Active savings goals only
    pub goals_count: usize,
}

/// Projected expenses for a month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEstimate {
    pub month: String,
    pub estimate: f64,
    pub days_elapsed: u32,
    pub total_days: u32,
    /// Completed months the projection is based on, oldest first
    pub history: Vec<MonthlyStats>,
}

impl Database {
    /// Income and expense totals for one month
    pub fn monthly_stats(&self, user_id: i64, month: &str) -> Result<MonthlyStats> {
        let (start, end) = month_bounds(month)?;
        let transactions = self.list_transactions_in_range(user_id, start, end)?;
        Ok(calculate_monthly_stats(&transactions, month))
    }

    /// Expense breakdown by category for `[start, end]`
    pub fn category_spending(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategorySpending>> {
        let transactions = self.list_transactions_in_range(user_id, start, end)?;
        Ok(calculate_category_spending(&transactions, start, end))
    }

    /// Dashboard figures for `month`
    pub fn dashboard_summary(&self, user_id: i64, month: &str) -> Result<DashboardSummary> {
        let accounts = self.list_accounts(user_id)?;
        let balances: Vec<i64> = accounts.iter().map(|a| a.balance).collect();

        let (start, end) = month_bounds(month)?;
        let transactions = self.list_transactions_in_range(user_id, start, end)?;
        let stats = calculate_monthly_stats(&transactions, month);

        let budgets = self.list_budgets(user_id, month)?;
        let goals = self.list_savings_goals(user_id)?;

        Ok(DashboardSummary {
            month: month.to_string(),
            total_balance: calculate_total_balance(&balances),
            income: stats.income,
            expenses: stats.expenses,
            balance: stats.balance,
            account_count: accounts.len(),
            budget_alerts: generate_budget_alerts(&budgets),
            category_spending: calculate_category_spending(&transactions, start, end),
            goals_count: goals
                .iter()
                .filter(|g| g.status == GoalStatus::Active)
                .count(),
        })
    }

    /// Insights for `month` compared with the month before it
    pub fn financial_insights(&self, user_id: i64, month: &str) -> Result<Vec<FinancialInsight>> {
        let (start, end) = month_bounds(month)?;
        let transactions = self.list_transactions_in_range(user_id, start, end)?;
        let current = calculate_monthly_stats(&transactions, month);
        let previous = self.monthly_stats(user_id, &previous_month(month)?)?;

        let category_spending = calculate_category_spending(&transactions, start, end);
        let budget_alerts = generate_budget_alerts(&self.list_budgets(user_id, month)?);
        let goals = self.list_savings_goals(user_id)?;

        let insights = generate_financial_insights(
            &current,
            Some(&previous),
            &category_spending,
            &budget_alerts,
            &goals,
        );
        tracing::debug!(user_id, month, count = insights.len(), "Generated insights");

        Ok(insights)
    }

    /// Stats for the `months` months ending at `month`, oldest first
    pub fn monthly_history(
        &self,
        user_id: i64,
        month: &str,
        months: usize,
    ) -> Result<Vec<MonthlyStats>> {
        trailing_months(month, months)?
            .iter()
            .map(|m| self.monthly_stats(user_id, m))
            .collect()
    }

    /// Project `month`'s expenses from the `months` months before it
    ///
    /// For the month containing `today` the projection is scaled by the days
    /// elapsed so far; other months use their full length.
    pub fn estimate_expenses(
        &self,
        user_id: i64,
        month: &str,
        months: usize,
        today: NaiveDate,
    ) -> Result<ExpenseEstimate> {
        let history = self.monthly_history(user_id, &previous_month(month)?, months)?;
        let total_days = days_in_month(month)?;
        let elapsed = if format_month(today) == month {
            days_elapsed(today)
        } else {
            total_days
        };

        Ok(ExpenseEstimate {
            month: month.to_string(),
            estimate: estimate_monthly_expenses(&history, elapsed, total_days),
            days_elapsed: elapsed,
            total_days,
            history,
        })
    }
}
