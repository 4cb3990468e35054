//! Builders for model values used across unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Budget, Category, GoalStatus, SavingsGoal, Transaction, TransactionType};

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A transaction dated at the given RFC 3339 timestamp
pub fn transaction(
    kind: TransactionType,
    category: Category,
    amount: i64,
    date: &str,
) -> Transaction {
    let transaction_date = DateTime::parse_from_rfc3339(date)
        .unwrap()
        .with_timezone(&Utc);

    Transaction {
        id: 1,
        user_id: 1,
        account_id: 1,
        amount,
        transaction_type: kind,
        category,
        description: None,
        transaction_date,
        is_recurring: false,
        recurring_id: None,
        categorized_automatically: true,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// A budget for 2024-03
pub fn budget(category: Category, limit: i64, spent: i64) -> Budget {
    Budget {
        id: 1,
        user_id: 1,
        category,
        limit,
        spent,
        month: "2024-03".to_string(),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn goal(status: GoalStatus, current_amount: i64) -> SavingsGoal {
    SavingsGoal {
        id: 1,
        user_id: 1,
        name: "Emergency fund".to_string(),
        target_amount: 1_000_000,
        current_amount,
        target_date: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
        description: None,
        status,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}
