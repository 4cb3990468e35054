//! Value objects produced by the analytics engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Month in `YYYY-MM` form
    pub month: String,
    pub income: i64,
    pub expenses: i64,
    /// `income - expenses`; may be negative
    pub balance: i64,
}

impl MonthlyStats {
    pub fn new(month: impl Into<String>, income: i64, expenses: i64) -> Self {
        Self {
            month: month.into(),
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// Share of total expenses attributable to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: Category,
    pub amount: i64,
    /// Percent of the period's total expenses (0 when there were none)
    pub percentage: f64,
}

/// Direction of month-over-month spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-over-month change in income and expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingComparison {
    /// Percent change in expenses (0 when the previous month had none)
    pub expense_change: f64,
    /// Percent change in income (0 when the previous month had none)
    pub income_change: f64,
    pub trend: Trend,
}

/// Budget utilization for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: Category,
    pub spent: i64,
    pub limit: i64,
    /// `spent / limit * 100`, or 0 when the limit is not positive; may exceed 100
    pub percentage: f64,
    /// Whether utilization reached the alert threshold
    pub is_alert: bool,
}

/// Tone of a generated insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Warning,
    Success,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Info => "info",
            InsightKind::Warning => "warning",
            InsightKind::Success => "success",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(InsightKind::Info),
            "warning" => Ok(InsightKind::Warning),
            "success" => Ok(InsightKind::Success),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A human-readable observation about the user's finances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Whether the user can act on it
    pub actionable: bool,
}

impl FinancialInsight {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: InsightKind,
        actionable: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            actionable,
        }
    }
}
