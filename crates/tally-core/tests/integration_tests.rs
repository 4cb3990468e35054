//! Integration tests for tally-core
//!
//! These tests exercise the full categorize → store → analyze workflow.

use chrono::{TimeZone, Utc};
use tally_core::{
    analytics::{generate_budget_alerts, InsightKind},
    db::Database,
    models::{
        AccountType, Category, GoalStatus, NewAccount, NewBudget, NewSavingsGoal, NewTransaction,
        TransactionType, UpdateBudget,
    },
    resolve_category, CategorizerClient,
};

/// A month of Brazilian household spending: (description, amount, day, type)
fn march_statement() -> Vec<(&'static str, i64, u32, TransactionType)> {
    vec![
        ("Salário ACME", 800_000, 5, TransactionType::Income),
        ("iFood pizza delivery", 8_990, 6, TransactionType::Expense),
        ("Supermercado Extra", 45_210, 8, TransactionType::Expense),
        ("Uber viagem centro", 2_350, 9, TransactionType::Expense),
        ("Netflix", 5_590, 10, TransactionType::Expense),
        ("Farmácia São João", 7_800, 12, TransactionType::Expense),
        ("Conta de luz", 18_000, 15, TransactionType::Expense),
        ("xyz123 unmatched", 1_000, 20, TransactionType::Expense),
    ]
}

// =============================================================================
// Database Integration Tests
// =============================================================================

#[tokio::test]
async fn test_categorize_store_and_analyze() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let categorizer = CategorizerClient::rules();

    let user = db.upsert_user("ana@example.com").expect("Failed to upsert user");
    let account = db
        .create_account(
            user.id,
            &NewAccount {
                name: "Conta corrente".to_string(),
                account_type: AccountType::BankAccount,
                balance: 250_000,
                currency: "BRL".to_string(),
                description: None,
            },
        )
        .expect("Failed to create account");

    for (description, amount, day, kind) in march_statement() {
        let tx = NewTransaction {
            account_id: account.id,
            amount,
            transaction_type: kind,
            category: None,
            description: Some(description.to_string()),
            transaction_date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            is_recurring: false,
            recurring_id: None,
        };
        let categorization = resolve_category(&categorizer, None, Some(description), amount, kind)
            .await
            .expect("Categorization failed");
        db.create_transaction(user.id, &tx, categorization)
            .expect("Failed to store transaction");
    }

    let stored = db.list_transactions(user.id, 100, 0).unwrap();
    assert_eq!(stored.len(), 8);
    assert!(stored.iter().all(|t| t.categorized_automatically));

    let salary = stored
        .iter()
        .find(|t| t.transaction_type == TransactionType::Income)
        .unwrap();
    assert_eq!(salary.category, Category::Salary);

    let unmatched = stored
        .iter()
        .find(|t| t.description.as_deref() == Some("xyz123 unmatched"))
        .unwrap();
    assert_eq!(unmatched.category, Category::Other);

    let netflix = stored
        .iter()
        .find(|t| t.description.as_deref() == Some("Netflix"))
        .unwrap();
    assert_eq!(netflix.category, Category::Entertainment);

    let stats = db.monthly_stats(user.id, "2024-03").unwrap();
    assert_eq!(stats.income, 800_000);
    assert_eq!(stats.expenses, 88_940);
    assert_eq!(stats.balance, 711_060);

    let (start, end) = tally_core::period::month_bounds("2024-03").unwrap();
    let spending = db.category_spending(user.id, start, end).unwrap();
    let total: f64 = spending.iter().map(|s| s.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);
    assert!(spending.windows(2).all(|w| w[0].amount >= w[1].amount));
}

#[test]
fn test_budget_alerts_and_insights() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let user = db.upsert_user("ana@example.com").unwrap();

    let budget = db
        .create_budget(
            user.id,
            &NewBudget {
                category: Category::Food,
                limit: 1_000,
                month: "2024-03".to_string(),
            },
        )
        .unwrap();
    db.update_budget(
        user.id,
        budget.id,
        &UpdateBudget {
            spent: Some(850),
            ..Default::default()
        },
    )
    .unwrap();

    let alerts = generate_budget_alerts(&db.list_budgets(user.id, "2024-03").unwrap());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, Category::Food);
    assert_eq!(alerts[0].percentage, 85.0);
    assert!(alerts[0].is_alert);

    let goal = db
        .create_savings_goal(
            user.id,
            &NewSavingsGoal {
                name: "Reserva de emergência".to_string(),
                target_amount: 1_000_000,
                target_date: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
                description: None,
            },
        )
        .unwrap();
    db.update_goal_progress(user.id, goal.id, 50_000).unwrap();

    let insights = db.financial_insights(user.id, "2024-03").unwrap();
    assert_eq!(insights.len(), 2);
    assert_eq!(insights[0].title, "Food Budget Alert");
    assert_eq!(insights[0].kind, InsightKind::Warning);
    assert_eq!(insights[1].title, "Goal Progress");

    let summary = db.dashboard_summary(user.id, "2024-03").unwrap();
    assert_eq!(summary.goals_count, 1);
    assert_eq!(summary.budget_alerts.len(), 1);

    let goals = db.list_savings_goals(user.id).unwrap();
    assert_eq!(goals[0].status, GoalStatus::Active);
}

#[test]
fn test_dashboard_serializes_camel_case() {
    let db = Database::in_memory().unwrap();
    let user = db.upsert_user("local-dev").unwrap();

    let summary = db.dashboard_summary(user.id, "2024-03").unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    for key in [
        "totalBalance",
        "income",
        "expenses",
        "balance",
        "accountCount",
        "budgetAlerts",
        "categorySpending",
        "goalsCount",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
}
