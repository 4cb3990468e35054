//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Domain models and input validation
//! - Keyword-based transaction categorization behind a pluggable interface
//! - Pure analytics: monthly stats, category spending, budget alerts, insights
//! - SQLite persistence with connection pooling and an audit log

pub mod analytics;
pub mod categorize;
pub mod db;
pub mod error;
pub mod models;
pub mod money;
pub mod period;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use analytics::{
    BudgetAlert, CategorySpending, FinancialInsight, InsightEngine, InsightKind, MonthlyStats,
    SpendingComparison, Trend,
};
pub use categorize::{
    resolve_category, CategorizationResult, Categorizer, CategorizerClient, RuleBasedCategorizer,
};
pub use db::{AuditEntry, Database, DashboardSummary, ExpenseEstimate};
pub use error::{Error, Result};
