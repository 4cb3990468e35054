//! Pure aggregate computations over a single user's records

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{Budget, Category, Transaction, TransactionType};

use super::types::{BudgetAlert, CategorySpending, MonthlyStats, SpendingComparison, Trend};

/// Utilization percentage at which a budget raises an alert
pub const BUDGET_ALERT_THRESHOLD: f64 = 80.0;

/// Percent change in expenses beyond which the trend is no longer stable
pub const TREND_THRESHOLD: f64 = 10.0;

/// Month length assumed when extrapolating expenses
pub const DEFAULT_DAYS_IN_MONTH: u32 = 30;

/// Number of trailing months averaged by `estimate_monthly_expenses`
pub const ESTIMATE_WINDOW: usize = 3;

/// Sum income and expenses for transactions dated in `month` (`YYYY-MM`)
///
/// Membership is decided by prefix-matching the UTC ISO-8601 timestamp.
pub fn calculate_monthly_stats(transactions: &[Transaction], month: &str) -> MonthlyStats {
    let mut income = 0;
    let mut expenses = 0;

    for tx in transactions {
        let iso = tx
            .transaction_date
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        if !iso.starts_with(month) {
            continue;
        }
        match tx.transaction_type {
            TransactionType::Income => income += tx.amount,
            TransactionType::Expense => expenses += tx.amount,
        }
    }

    MonthlyStats::new(month, income, expenses)
}

/// Expense totals per category within `[start, end]`, largest first
///
/// Categories with equal totals keep the order in which they first appeared.
pub fn calculate_category_spending(
    transactions: &[Transaction],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<CategorySpending> {
    let mut totals: Vec<(Category, i64)> = Vec::new();
    let mut total_expenses: i64 = 0;

    for tx in transactions {
        if tx.transaction_type != TransactionType::Expense
            || tx.transaction_date < start
            || tx.transaction_date > end
        {
            continue;
        }
        match totals.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, amount)) => *amount += tx.amount,
            None => totals.push((tx.category, tx.amount)),
        }
        total_expenses += tx.amount;
    }

    let mut spending: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            category,
            amount,
            percentage: if total_expenses > 0 {
                amount as f64 / total_expenses as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    spending.sort_by(|a, b| b.amount.cmp(&a.amount));
    spending
}

fn percent_change(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else {
        0.0
    }
}

/// Compare two months; changes are 0 when the previous value was not positive
pub fn compare_monthly_spending(
    current: &MonthlyStats,
    previous: &MonthlyStats,
) -> SpendingComparison {
    let expense_change = percent_change(current.expenses, previous.expenses);
    let income_change = percent_change(current.income, previous.income);

    let trend = if expense_change > TREND_THRESHOLD {
        Trend::Up
    } else if expense_change < -TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Stable
    };

    SpendingComparison {
        expense_change,
        income_change,
        trend,
    }
}

/// Project a month's expenses from the average of the last three months
///
/// With `days_elapsed > 0` the average is scaled by `total_days / days_elapsed`
/// and rounded; otherwise the raw average is returned. Empty history gives 0.
pub fn estimate_monthly_expenses(
    monthly_stats: &[MonthlyStats],
    days_elapsed: u32,
    total_days: u32,
) -> f64 {
    if monthly_stats.is_empty() {
        return 0.0;
    }

    let recent = &monthly_stats[monthly_stats.len().saturating_sub(ESTIMATE_WINDOW)..];
    let average =
        recent.iter().map(|m| m.expenses as f64).sum::<f64>() / recent.len() as f64;

    if days_elapsed > 0 {
        (average / days_elapsed as f64 * total_days as f64).round()
    } else {
        average
    }
}

/// Budget utilization for each budget, most utilized first
pub fn generate_budget_alerts(budgets: &[Budget]) -> Vec<BudgetAlert> {
    let mut alerts: Vec<BudgetAlert> = budgets
        .iter()
        .map(|budget| {
            let percentage = if budget.limit > 0 {
                budget.spent as f64 / budget.limit as f64 * 100.0
            } else {
                0.0
            };
            BudgetAlert {
                category: budget.category,
                spent: budget.spent,
                limit: budget.limit,
                percentage,
                is_alert: percentage >= BUDGET_ALERT_THRESHOLD,
            }
        })
        .collect();

    alerts.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    alerts
}

/// Sum of account balances
pub fn calculate_total_balance(account_balances: &[i64]) -> i64 {
    account_balances.iter().sum()
}

/// Balance left after money committed to budgets and savings goals
pub fn calculate_available_balance(total_balance: i64, budget_spent: i64, goals_amount: i64) -> i64 {
    total_balance - budget_spent - goals_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category::*;
    use crate::models::TransactionType::{Expense, Income};
    use crate::period::month_bounds;
    use crate::test_utils::{budget, transaction};

    #[test]
    fn test_monthly_stats_filters_by_month_prefix() {
        let txs = vec![
            transaction(Income, Salary, 500_000, "2024-03-01T09:00:00Z"),
            transaction(Expense, Food, 12_000, "2024-03-15T12:00:00Z"),
            transaction(Expense, Transportation, 3_000, "2024-03-31T23:59:59Z"),
            transaction(Expense, Food, 99_999, "2024-04-01T00:00:00Z"),
            transaction(Income, Salary, 1, "2024-02-29T23:59:59Z"),
        ];

        let stats = calculate_monthly_stats(&txs, "2024-03");
        assert_eq!(stats.month, "2024-03");
        assert_eq!(stats.income, 500_000);
        assert_eq!(stats.expenses, 15_000);
        assert_eq!(stats.balance, stats.income - stats.expenses);
    }

    #[test]
    fn test_monthly_stats_empty() {
        let stats = calculate_monthly_stats(&[], "2024-03");
        assert_eq!(stats, MonthlyStats::new("2024-03", 0, 0));
    }

    #[test]
    fn test_category_spending_sorted_and_percentages_sum_to_100() {
        let txs = vec![
            transaction(Expense, Food, 3_000, "2024-03-02T10:00:00Z"),
            transaction(Expense, Health, 5_000, "2024-03-03T10:00:00Z"),
            transaction(Expense, Food, 4_000, "2024-03-04T10:00:00Z"),
            transaction(Income, Salary, 100_000, "2024-03-05T10:00:00Z"),
            transaction(Expense, Utilities, 8_000, "2024-04-01T10:00:00Z"),
        ];
        let (start, end) = month_bounds("2024-03").unwrap();

        let spending = calculate_category_spending(&txs, start, end);
        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].category, Food);
        assert_eq!(spending[0].amount, 7_000);
        assert_eq!(spending[1].category, Health);

        let sum: f64 = spending.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_spending_bounds_are_inclusive() {
        let txs = vec![
            transaction(Expense, Food, 100, "2024-03-01T00:00:00Z"),
            transaction(Expense, Health, 100, "2024-03-31T23:59:59Z"),
        ];
        let (start, end) = month_bounds("2024-03").unwrap();
        assert_eq!(calculate_category_spending(&txs, start, end).len(), 2);
    }

    #[test]
    fn test_category_spending_ties_keep_first_appearance() {
        let txs = vec![
            transaction(Expense, Health, 1_000, "2024-03-02T10:00:00Z"),
            transaction(Expense, Food, 1_000, "2024-03-03T10:00:00Z"),
        ];
        let (start, end) = month_bounds("2024-03").unwrap();
        let spending = calculate_category_spending(&txs, start, end);
        assert_eq!(spending[0].category, Health);
        assert_eq!(spending[1].category, Food);
    }

    #[test]
    fn test_category_spending_no_expenses() {
        let txs = vec![transaction(Income, Salary, 1_000, "2024-03-02T10:00:00Z")];
        let (start, end) = month_bounds("2024-03").unwrap();
        assert!(calculate_category_spending(&txs, start, end).is_empty());
    }

    #[test]
    fn test_category_spending_zero_total_gives_zero_percentages() {
        let txs = vec![
            transaction(Expense, Food, 0, "2024-03-02T10:00:00Z"),
            transaction(Expense, Health, 0, "2024-03-03T10:00:00Z"),
        ];
        let (start, end) = month_bounds("2024-03").unwrap();
        let spending = calculate_category_spending(&txs, start, end);
        assert_eq!(spending.len(), 2);
        assert!(spending.iter().all(|s| s.amount == 0 && s.percentage == 0.0));
    }

    #[test]
    fn test_compare_monthly_spending_trends() {
        let prev = MonthlyStats::new("2024-02", 1_000, 1_000);

        let up = compare_monthly_spending(&MonthlyStats::new("2024-03", 1_000, 1_200), &prev);
        assert_eq!(up.trend, Trend::Up);
        assert!((up.expense_change - 20.0).abs() < 1e-9);

        let down = compare_monthly_spending(&MonthlyStats::new("2024-03", 500, 800), &prev);
        assert_eq!(down.trend, Trend::Down);
        assert!((down.income_change + 50.0).abs() < 1e-9);

        // Exactly 10% is still stable
        let stable = compare_monthly_spending(&MonthlyStats::new("2024-03", 1_000, 1_100), &prev);
        assert_eq!(stable.trend, Trend::Stable);
    }

    #[test]
    fn test_compare_monthly_spending_zero_previous() {
        let prev = MonthlyStats::new("2024-02", 0, 0);
        let cmp = compare_monthly_spending(&MonthlyStats::new("2024-03", 5_000, 9_000), &prev);
        assert_eq!(cmp.expense_change, 0.0);
        assert_eq!(cmp.income_change, 0.0);
        assert_eq!(cmp.trend, Trend::Stable);
    }

    #[test]
    fn test_estimate_monthly_expenses() {
        assert_eq!(estimate_monthly_expenses(&[], 10, 30), 0.0);

        let history = vec![
            MonthlyStats::new("2023-12", 0, 90_000),
            MonthlyStats::new("2024-01", 0, 3_000),
            MonthlyStats::new("2024-02", 0, 6_000),
            MonthlyStats::new("2024-03", 0, 9_000),
        ];
        // Average of the last three: 6000; 6000 / 10 * 30
        assert_eq!(estimate_monthly_expenses(&history, 10, 30), 18_000.0);
        // No elapsed days: raw average
        assert_eq!(estimate_monthly_expenses(&history, 0, 30), 6_000.0);
        // Shorter history averages what is there
        assert_eq!(estimate_monthly_expenses(&history[..1], 0, 30), 90_000.0);
        assert_eq!(
            estimate_monthly_expenses(&history[1..3], 7, DEFAULT_DAYS_IN_MONTH),
            19_286.0
        );
    }

    #[test]
    fn test_budget_alerts() {
        let alerts = generate_budget_alerts(&[budget(Food, 1_000, 850)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, Food);
        assert_eq!(alerts[0].percentage, 85.0);
        assert!(alerts[0].is_alert);
    }

    #[test]
    fn test_budget_alerts_threshold_and_order() {
        let alerts = generate_budget_alerts(&[
            budget(Food, 1_000, 799),
            budget(Health, 1_000, 800),
            budget(Education, 0, 500),
            budget(Utilities, 1_000, 2_500),
        ]);
        let order: Vec<Category> = alerts.iter().map(|a| a.category).collect();
        assert_eq!(order, vec![Utilities, Health, Food, Education]);

        assert_eq!(alerts[0].percentage, 250.0);
        assert!(alerts[0].is_alert);
        assert!(alerts[1].is_alert);
        assert!(!alerts[2].is_alert);
        assert_eq!(alerts[3].percentage, 0.0);
        assert!(!alerts[3].is_alert);
    }

    #[test]
    fn test_balances() {
        assert_eq!(calculate_total_balance(&[]), 0);
        assert_eq!(calculate_total_balance(&[10_000, 2_500, 0]), 12_500);
        assert_eq!(calculate_available_balance(12_500, 2_000, 5_000), 5_500);
        assert_eq!(calculate_available_balance(1_000, 2_000, 0), -1_000);
    }
}
