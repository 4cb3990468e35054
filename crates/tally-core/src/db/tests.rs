//! Database tests

use super::*;
use crate::categorize::CategorizationResult;
use crate::error::Error;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn setup() -> (Database, i64, i64) {
        let db = Database::in_memory().unwrap();
        let user = db.upsert_user("ana@example.com").unwrap();
        let account = db
            .create_account(
                user.id,
                &NewAccount {
                    name: "Nubank".to_string(),
                    account_type: AccountType::BankAccount,
                    balance: 150_000,
                    currency: "BRL".to_string(),
                    description: None,
                },
            )
            .unwrap();
        (db, user.id, account.id)
    }

    fn new_tx(
        account_id: i64,
        kind: TransactionType,
        amount: i64,
        description: &str,
        date: DateTime<Utc>,
    ) -> NewTransaction {
        NewTransaction {
            account_id,
            amount,
            transaction_type: kind,
            category: None,
            description: Some(description.to_string()),
            transaction_date: date,
            is_recurring: false,
            recurring_id: None,
        }
    }

    fn add_expense(
        db: &Database,
        user_id: i64,
        account_id: i64,
        category: Category,
        amount: i64,
        date: DateTime<Utc>,
    ) -> Transaction {
        db.create_transaction(
            user_id,
            &new_tx(account_id, TransactionType::Expense, amount, "expense", date),
            CategorizationResult::new(category, 0.8),
        )
        .unwrap()
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let user = db.upsert_user("local-dev").unwrap();
        assert!(db.list_accounts(user.id).unwrap().is_empty());
        assert!(db.list_audit_log(10).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_user_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let first = db.upsert_user("ana@example.com").unwrap();
        let second = db.upsert_user("ana@example.com").unwrap();
        assert_eq!(first.id, second.id);

        let other = db.upsert_user("bia@example.com").unwrap();
        assert_ne!(first.id, other.id);
        assert_eq!(db.get_user(other.id).unwrap().unwrap().email, "bia@example.com");
        assert!(db.get_user(999).unwrap().is_none());
    }

    #[test]
    fn test_account_crud() {
        let (db, user_id, account_id) = setup();

        let account = db.get_account(user_id, account_id).unwrap().unwrap();
        assert_eq!(account.name, "Nubank");
        assert_eq!(account.balance, 150_000);
        assert_eq!(account.currency, "BRL");

        let updated = db
            .update_account(
                user_id,
                account_id,
                &UpdateAccount {
                    balance: Some(200_000),
                    description: Some("Main account".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.balance, 200_000);
        assert_eq!(updated.name, "Nubank");
        assert_eq!(updated.description.as_deref(), Some("Main account"));

        assert!(db.delete_account(user_id, account_id).unwrap());
        assert!(!db.delete_account(user_id, account_id).unwrap());
        assert!(db.get_account(user_id, account_id).unwrap().is_none());
    }

    #[test]
    fn test_account_validation_rejected() {
        let (db, user_id, _) = setup();
        let result = db.create_account(
            user_id,
            &NewAccount {
                name: String::new(),
                account_type: AccountType::Savings,
                balance: 0,
                currency: "BRL".to_string(),
                description: None,
            },
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_accounts_scoped_to_user() {
        let (db, _, account_id) = setup();
        let intruder = db.upsert_user("eve@example.com").unwrap();

        assert!(db.list_accounts(intruder.id).unwrap().is_empty());
        assert!(db.get_account(intruder.id, account_id).unwrap().is_none());
        assert!(db
            .update_account(intruder.id, account_id, &UpdateAccount::default())
            .unwrap()
            .is_none());
        assert!(!db.delete_account(intruder.id, account_id).unwrap());
    }

    #[test]
    fn test_transaction_on_foreign_account_is_forbidden() {
        let (db, _, account_id) = setup();
        let intruder = db.upsert_user("eve@example.com").unwrap();

        let result = db.create_transaction(
            intruder.id,
            &new_tx(account_id, TransactionType::Expense, 100, "x", at(2024, 3, 1, 12)),
            CategorizationResult::new(Category::Other, 0.3),
        );
        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[test]
    fn test_transactions_newest_first_with_paging() {
        let (db, user_id, account_id) = setup();
        for day in 1..=5 {
            add_expense(&db, user_id, account_id, Category::Food, 100 * day as i64, at(2024, 3, day, 9));
        }

        let all = db.list_transactions(user_id, 100, 0).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].amount, 500);
        assert_eq!(all[4].amount, 100);

        let page = db.list_transactions(user_id, 2, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].amount, 300);
    }

    #[test]
    fn test_range_includes_last_day_of_month() {
        let (db, user_id, account_id) = setup();
        add_expense(&db, user_id, account_id, Category::Food, 100, at(2024, 2, 29, 22));
        add_expense(&db, user_id, account_id, Category::Food, 200, at(2024, 3, 1, 0));

        let (start, end) = crate::period::month_bounds("2024-02").unwrap();
        let february = db.list_transactions_in_range(user_id, start, end).unwrap();
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].amount, 100);
    }

    #[test]
    fn test_transactions_by_category() {
        let (db, user_id, account_id) = setup();
        add_expense(&db, user_id, account_id, Category::Food, 100, at(2024, 3, 2, 9));
        add_expense(&db, user_id, account_id, Category::Health, 200, at(2024, 3, 3, 9));
        add_expense(&db, user_id, account_id, Category::Food, 300, at(2024, 4, 3, 9));

        let (start, end) = crate::period::month_bounds("2024-03").unwrap();
        let food = db
            .list_transactions_by_category(user_id, Category::Food, start, end)
            .unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].amount, 100);
    }

    #[test]
    fn test_manual_category_override() {
        let (db, user_id, account_id) = setup();
        let tx = add_expense(&db, user_id, account_id, Category::Other, 100, at(2024, 3, 2, 9));
        assert!(tx.categorized_automatically);

        let updated = db
            .update_transaction_category(user_id, tx.id, Category::Education)
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, Category::Education);
        assert!(!updated.categorized_automatically);

        assert!(db
            .update_transaction_category(user_id, 9999, Category::Food)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_partial_transaction_update() {
        let (db, user_id, account_id) = setup();
        let tx = add_expense(&db, user_id, account_id, Category::Food, 100, at(2024, 3, 2, 9));

        let updated = db
            .update_transaction(
                user_id,
                tx.id,
                &UpdateTransaction {
                    amount: Some(250),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, 250);
        assert_eq!(updated.category, Category::Food);
        assert!(updated.categorized_automatically);
        assert_eq!(updated.transaction_date, tx.transaction_date);

        assert!(db.delete_transaction(user_id, tx.id).unwrap());
        assert!(db.get_transaction(user_id, tx.id).unwrap().is_none());
    }

    #[test]
    fn test_deleting_account_removes_its_transactions() {
        let (db, user_id, account_id) = setup();
        add_expense(&db, user_id, account_id, Category::Food, 100, at(2024, 3, 2, 9));

        assert!(db.delete_account(user_id, account_id).unwrap());
        assert!(db.list_transactions(user_id, 100, 0).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_stored_timestamp_is_an_error() {
        let (db, user_id, account_id) = setup();
        let tx = add_expense(&db, user_id, account_id, Category::Food, 100, at(2024, 3, 2, 9));

        db.conn()
            .unwrap()
            .execute(
                "UPDATE transactions SET transaction_date = 'garbage' WHERE id = ?",
                [tx.id],
            )
            .unwrap();

        assert!(matches!(
            db.get_transaction(user_id, tx.id),
            Err(Error::Database(rusqlite::Error::FromSqlConversionFailure(7, _, _)))
        ));
        assert!(db.list_transactions(user_id, 100, 0).is_err());
    }

    #[test]
    fn test_recurring_crud() {
        let (db, user_id, account_id) = setup();
        let recurring = db
            .create_recurring_transaction(
                user_id,
                &NewRecurringTransaction {
                    account_id,
                    amount: 5_590,
                    transaction_type: TransactionType::Expense,
                    category: Category::Entertainment,
                    description: Some("Netflix".to_string()),
                    frequency: Frequency::Monthly,
                    next_occurrence_date: at(2024, 4, 10, 0),
                    end_date: None,
                },
            )
            .unwrap();
        assert_eq!(recurring.status, RecurringStatus::Active);

        let paused = db
            .update_recurring_transaction(
                user_id,
                recurring.id,
                &UpdateRecurringTransaction {
                    status: Some(RecurringStatus::Paused),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(paused.status, RecurringStatus::Paused);
        assert_eq!(paused.frequency, Frequency::Monthly);

        let bad_end = db.update_recurring_transaction(
            user_id,
            recurring.id,
            &UpdateRecurringTransaction {
                end_date: Some(at(2024, 1, 1, 0)),
                ..Default::default()
            },
        );
        assert!(matches!(bad_end, Err(Error::Validation(_))));

        assert_eq!(db.list_recurring_transactions(user_id).unwrap().len(), 1);
        assert!(db.delete_recurring_transaction(user_id, recurring.id).unwrap());
        assert!(db.list_recurring_transactions(user_id).unwrap().is_empty());
    }

    #[test]
    fn test_budgets_by_month() {
        let (db, user_id, _) = setup();
        let march = db
            .create_budget(
                user_id,
                &NewBudget {
                    category: Category::Food,
                    limit: 100_000,
                    month: "2024-03".to_string(),
                },
            )
            .unwrap();
        assert_eq!(march.spent, 0);
        db.create_budget(
            user_id,
            &NewBudget {
                category: Category::Food,
                limit: 100_000,
                month: "2024-04".to_string(),
            },
        )
        .unwrap();

        assert_eq!(db.list_budgets(user_id, "2024-03").unwrap().len(), 1);

        let updated = db
            .update_budget(
                user_id,
                march.id,
                &UpdateBudget {
                    spent: Some(85_000),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.spent, 85_000);
        assert_eq!(updated.limit, 100_000);

        let bad_month = db.create_budget(
            user_id,
            &NewBudget {
                category: Category::Food,
                limit: 100,
                month: "2024-13".to_string(),
            },
        );
        assert!(bad_month.is_err());
    }

    #[test]
    fn test_goal_progress() {
        let (db, user_id, _) = setup();
        let goal = db
            .create_savings_goal(
                user_id,
                &NewSavingsGoal {
                    name: "Viagem".to_string(),
                    target_amount: 500_000,
                    target_date: at(2025, 6, 1, 0),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(goal.current_amount, 0);
        assert_eq!(goal.status, GoalStatus::Active);

        let progressed = db.update_goal_progress(user_id, goal.id, 120_000).unwrap().unwrap();
        assert_eq!(progressed.current_amount, 120_000);

        assert!(matches!(
            db.update_goal_progress(user_id, goal.id, -1),
            Err(Error::Validation(_))
        ));

        let done = db
            .update_savings_goal(
                user_id,
                goal.id,
                &UpdateSavingsGoal {
                    status: Some(GoalStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(done.status, GoalStatus::Completed);
        assert_eq!(done.current_amount, 120_000);

        assert!(db.delete_savings_goal(user_id, goal.id).unwrap());
    }

    #[test]
    fn test_audit_log_most_recent_first() {
        let db = Database::in_memory().unwrap();
        db.log_audit("ana@example.com", "create", Some("account"), Some(1), None)
            .unwrap();
        db.log_audit("ana@example.com", "delete", Some("account"), Some(1), Some("cleanup"))
            .unwrap();

        let entries = db.list_audit_log(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].details.as_deref(), Some("cleanup"));
        assert_eq!(db.list_audit_log(1).unwrap().len(), 1);
    }

    #[test]
    fn test_dashboard_summary() {
        let (db, user_id, account_id) = setup();
        db.create_transaction(
            user_id,
            &new_tx(account_id, TransactionType::Income, 500_000, "Salário", at(2024, 3, 5, 9)),
            CategorizationResult::new(Category::Salary, 0.5),
        )
        .unwrap();
        add_expense(&db, user_id, account_id, Category::Food, 30_000, at(2024, 3, 6, 9));
        add_expense(&db, user_id, account_id, Category::Health, 10_000, at(2024, 3, 7, 9));
        add_expense(&db, user_id, account_id, Category::Food, 99_999, at(2024, 2, 7, 9));

        let summary = db.dashboard_summary(user_id, "2024-03").unwrap();
        assert_eq!(summary.total_balance, 150_000);
        assert_eq!(summary.income, 500_000);
        assert_eq!(summary.expenses, 40_000);
        assert_eq!(summary.balance, 460_000);
        assert_eq!(summary.account_count, 1);
        assert_eq!(summary.category_spending.len(), 2);
        assert_eq!(summary.category_spending[0].category, Category::Food);
        assert_eq!(summary.goals_count, 0);
    }

    #[test]
    fn test_insights_compare_with_previous_month() {
        let (db, user_id, account_id) = setup();
        add_expense(&db, user_id, account_id, Category::Food, 10_000, at(2024, 2, 10, 9));
        add_expense(&db, user_id, account_id, Category::Food, 20_000, at(2024, 3, 10, 9));

        let insights = db.financial_insights(user_id, "2024-03").unwrap();
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Spending Up", "Dominant Category", "Negative Month"]);
        assert!(insights[0].description.contains("100%"));
    }

    #[test]
    fn test_monthly_history_and_estimate() {
        let (db, user_id, account_id) = setup();
        add_expense(&db, user_id, account_id, Category::Food, 3_000, at(2024, 1, 10, 9));
        add_expense(&db, user_id, account_id, Category::Food, 6_000, at(2024, 2, 10, 9));

        let history = db.monthly_history(user_id, "2024-02", 3).unwrap();
        let months: Vec<&str> = history.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(history[2].expenses, 6_000);

        // Past month: scaled by its full length, so the plain average
        let past = db
            .estimate_expenses(user_id, "2024-03", 3, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        assert_eq!(past.total_days, 31);
        assert_eq!(past.days_elapsed, 31);
        assert_eq!(past.estimate, 3_000.0);

        let current = db
            .estimate_expenses(user_id, "2024-03", 3, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
            .unwrap();
        assert_eq!(current.days_elapsed, 10);
        assert_eq!(current.estimate, 9_300.0);
    }
}
