//! Financial analytics
//!
//! Pure computations over already-loaded models. Nothing here touches the
//! database; the `db` layer gathers inputs and calls into these functions.
//!
//! - **stats** - monthly totals, category breakdowns, trends, alerts, estimates
//! - **insights** - rule engine producing user-facing insight cards
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analytics::{calculate_monthly_stats, generate_financial_insights};
//!
//! let current = calculate_monthly_stats(&transactions, "2024-03");
//! let insights = generate_financial_insights(&current, None, &[], &[], &goals);
//! ```

pub mod insights;
pub mod stats;
pub mod types;

pub use insights::{
    generate_financial_insights, BudgetAlertRule, DominantCategoryRule, GoalProgressRule,
    InsightContext, InsightEngine, InsightRule, MonthlyBalanceRule, SpendingTrendRule,
};
pub use stats::{
    calculate_available_balance, calculate_category_spending, calculate_monthly_stats,
    calculate_total_balance, compare_monthly_spending, estimate_monthly_expenses,
    generate_budget_alerts,
};
pub use types::{
    BudgetAlert, CategorySpending, FinancialInsight, InsightKind, MonthlyStats,
    SpendingComparison, Trend,
};
