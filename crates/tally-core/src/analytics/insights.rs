//! Insight rules and the engine that runs them
//!
//! Each rule looks at one aspect of the month and emits zero or more
//! insights. Rules run in registration order and their output is
//! concatenated, so registration order is display order.

use crate::models::{GoalStatus, SavingsGoal};
use crate::money::format_money;

use super::stats::compare_monthly_spending;
use super::types::{
    BudgetAlert, CategorySpending, FinancialInsight, InsightKind, MonthlyStats, Trend,
};

/// Share of expenses above which the top category is called out
pub const DOMINANT_CATEGORY_THRESHOLD: f64 = 30.0;

/// Currency used when rendering balances in insight text
const DISPLAY_CURRENCY: &str = "BRL";

/// Inputs shared by every rule
pub struct InsightContext<'a> {
    pub current: &'a MonthlyStats,
    pub previous: Option<&'a MonthlyStats>,
    /// Ordered largest first
    pub category_spending: &'a [CategorySpending],
    pub budget_alerts: &'a [BudgetAlert],
    pub savings_goals: &'a [SavingsGoal],
}

/// A single insight rule
pub trait InsightRule: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &'static str;

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight>;
}

fn rounded(value: f64) -> i64 {
    value.round() as i64
}

/// Month-over-month spending direction
pub struct SpendingTrendRule;

impl InsightRule for SpendingTrendRule {
    fn id(&self) -> &'static str {
        "spending_trend"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        let Some(previous) = ctx.previous else {
            return vec![];
        };

        let comparison = compare_monthly_spending(ctx.current, previous);
        match comparison.trend {
            Trend::Up => vec![FinancialInsight::new(
                "Spending Up",
                format!(
                    "Your spending increased {}% compared to last month.",
                    rounded(comparison.expense_change)
                ),
                InsightKind::Warning,
                true,
            )],
            Trend::Down => vec![FinancialInsight::new(
                "Spending Down",
                format!(
                    "Well done! Your spending decreased {}% compared to last month.",
                    rounded(comparison.expense_change.abs())
                ),
                InsightKind::Success,
                false,
            )],
            Trend::Stable => vec![],
        }
    }
}

/// Calls out a category that dominates the month's expenses
pub struct DominantCategoryRule;

impl InsightRule for DominantCategoryRule {
    fn id(&self) -> &'static str {
        "dominant_category"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        match ctx.category_spending.first() {
            Some(top) if top.percentage > DOMINANT_CATEGORY_THRESHOLD => {
                vec![FinancialInsight::new(
                    "Dominant Category",
                    format!(
                        "{} accounts for {}% of your spending this month.",
                        top.category.label(),
                        rounded(top.percentage)
                    ),
                    InsightKind::Info,
                    true,
                )]
            }
            _ => vec![],
        }
    }
}

/// One warning per budget at or over the alert threshold
pub struct BudgetAlertRule;

impl InsightRule for BudgetAlertRule {
    fn id(&self) -> &'static str {
        "budget_alert"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        ctx.budget_alerts
            .iter()
            .filter(|a| a.is_alert)
            .map(|alert| {
                FinancialInsight::new(
                    format!("{} Budget Alert", alert.category.label()),
                    format!(
                        "You have used {}% of your {} budget.",
                        rounded(alert.percentage),
                        alert.category.label()
                    ),
                    InsightKind::Warning,
                    true,
                )
            })
            .collect()
    }
}

/// Counts active goals that have received contributions
pub struct GoalProgressRule;

impl InsightRule for GoalProgressRule {
    fn id(&self) -> &'static str {
        "goal_progress"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        let progressing = ctx
            .savings_goals
            .iter()
            .filter(|g| g.status == GoalStatus::Active && g.current_amount > 0)
            .count();

        if progressing == 0 {
            return vec![];
        }

        vec![FinancialInsight::new(
            "Goal Progress",
            format!(
                "You are making progress on {} savings goal(s).",
                progressing
            ),
            InsightKind::Success,
            false,
        )]
    }
}

/// Surplus or deficit for the month
pub struct MonthlyBalanceRule;

impl InsightRule for MonthlyBalanceRule {
    fn id(&self) -> &'static str {
        "monthly_balance"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        let balance = ctx.current.balance;

        if balance > 0 {
            vec![FinancialInsight::new(
                "Positive Month",
                format!(
                    "You finished the month with a surplus of {}.",
                    format_money(balance, DISPLAY_CURRENCY)
                ),
                InsightKind::Success,
                false,
            )]
        } else if balance < 0 {
            vec![FinancialInsight::new(
                "Negative Month",
                format!(
                    "You finished the month with a deficit of {}.",
                    format_money(balance.saturating_abs(), DISPLAY_CURRENCY)
                ),
                InsightKind::Warning,
                true,
            )]
        } else {
            vec![]
        }
    }
}

/// Runs the registered rules in order
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(SpendingTrendRule));
        engine.register(Box::new(DominantCategoryRule));
        engine.register(Box::new(BudgetAlertRule));
        engine.register(Box::new(GoalProgressRule));
        engine.register(Box::new(MonthlyBalanceRule));

        engine
    }

    /// Create an engine with no rules
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Register a rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule and collect their insights
    pub fn generate(&self, ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
        let mut insights = vec![];

        for rule in &self.rules {
            let found = rule.evaluate(ctx);
            tracing::debug!(rule = rule.id(), count = found.len(), "Insight rule evaluated");
            insights.extend(found);
        }

        insights
    }
}

/// Generate insights with the built-in rules
pub fn generate_financial_insights(
    current: &MonthlyStats,
    previous: Option<&MonthlyStats>,
    category_spending: &[CategorySpending],
    budget_alerts: &[BudgetAlert],
    savings_goals: &[SavingsGoal],
) -> Vec<FinancialInsight> {
    let ctx = InsightContext {
        current,
        previous,
        category_spending,
        budget_alerts,
        savings_goals,
    };
    InsightEngine::new().generate(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::stats::generate_budget_alerts;
    use crate::models::Category;
    use crate::test_utils::{budget, goal};

    fn stats(income: i64, expenses: i64) -> MonthlyStats {
        MonthlyStats::new("2024-03", income, expenses)
    }

    fn spending(category: Category, amount: i64, percentage: f64) -> CategorySpending {
        CategorySpending {
            category,
            amount,
            percentage,
        }
    }

    #[test]
    fn test_deficit_warning_in_major_units() {
        let insights = generate_financial_insights(&stats(0, 500), None, &[], &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(insights[0].actionable);
        assert!(insights[0].description.contains("5.00"));
    }

    #[test]
    fn test_surplus_success() {
        let insights = generate_financial_insights(&stats(123_456, 0), None, &[], &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert!(!insights[0].actionable);
        assert!(insights[0].description.contains("R$ 1234.56"));
    }

    #[test]
    fn test_zero_balance_emits_nothing() {
        assert!(generate_financial_insights(&stats(0, 0), None, &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_trend_up_and_down() {
        let previous = stats(0, 1_000);

        let up = generate_financial_insights(&stats(1_500, 1_500), Some(&previous), &[], &[], &[]);
        assert_eq!(up[0].title, "Spending Up");
        assert!(up[0].description.contains("50%"));
        assert_eq!(up[0].kind, InsightKind::Warning);

        let down = generate_financial_insights(&stats(700, 700), Some(&previous), &[], &[], &[]);
        assert_eq!(down[0].title, "Spending Down");
        assert!(down[0].description.contains("30%"));
        assert_eq!(down[0].kind, InsightKind::Success);
        assert!(!down[0].actionable);

        let stable =
            generate_financial_insights(&stats(1_050, 1_050), Some(&previous), &[], &[], &[]);
        assert!(stable.is_empty());
    }

    #[test]
    fn test_dominant_category_only_above_threshold() {
        let current = stats(0, 0);

        let over = [spending(Category::Food, 700, 70.4)];
        let insights = generate_financial_insights(&current, None, &over, &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert!(insights[0].description.contains("Food"));
        assert!(insights[0].description.contains("70%"));

        let at = [spending(Category::Food, 300, 30.0)];
        assert!(generate_financial_insights(&current, None, &at, &[], &[]).is_empty());
    }

    #[test]
    fn test_one_warning_per_active_alert() {
        let alerts = generate_budget_alerts(&[
            budget(Category::Food, 1_000, 1_500),
            budget(Category::Health, 1_000, 900),
            budget(Category::Education, 1_000, 100),
        ]);
        let insights = generate_financial_insights(&stats(0, 0), None, &[], &alerts, &[]);
        assert_eq!(insights.len(), 2);
        assert!(insights[0].description.contains("150%"));
        assert!(insights[1].title.contains("Health"));
    }

    #[test]
    fn test_goal_progress_counts_active_funded_goals() {
        let goals = vec![
            goal(GoalStatus::Active, 1_000),
            goal(GoalStatus::Active, 0),
            goal(GoalStatus::Completed, 5_000),
            goal(GoalStatus::Active, 1),
        ];
        let insights = generate_financial_insights(&stats(0, 0), None, &[], &[], &goals);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].description.contains("2 savings goal"));

        let idle = vec![goal(GoalStatus::Active, 0), goal(GoalStatus::Abandoned, 10)];
        assert!(generate_financial_insights(&stats(0, 0), None, &[], &[], &idle).is_empty());
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let previous = stats(0, 100);
        let current = stats(0, 1_000);
        let spend = [spending(Category::Food, 1_000, 100.0)];
        let alerts = generate_budget_alerts(&[budget(Category::Food, 500, 1_000)]);
        let goals = vec![goal(GoalStatus::Active, 10)];

        let insights =
            generate_financial_insights(&current, Some(&previous), &spend, &alerts, &goals);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Spending Up",
                "Dominant Category",
                "Food Budget Alert",
                "Goal Progress",
                "Negative Month"
            ]
        );
    }

    #[test]
    fn test_custom_rule_registration() {
        struct Always;
        impl InsightRule for Always {
            fn id(&self) -> &'static str {
                "always"
            }
            fn evaluate(&self, _ctx: &InsightContext<'_>) -> Vec<FinancialInsight> {
                vec![FinancialInsight::new("x", "y", InsightKind::Info, false)]
            }
        }

        let mut engine = InsightEngine::empty();
        engine.register(Box::new(Always));
        let current = stats(0, 0);
        let ctx = InsightContext {
            current: &current,
            previous: None,
            category_spending: &[],
            budget_alerts: &[],
            savings_goals: &[],
        };
        assert_eq!(engine.generate(&ctx).len(), 1);
    }
}
