//! Input validation for create/update payloads
//!
//! Every check fails with `Error::Validation` carrying a message that is safe
//! to return to API clients.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::models::{
    NewAccount, NewBudget, NewRecurringTransaction, NewSavingsGoal, NewTransaction, UpdateAccount,
    UpdateBudget, UpdateRecurringTransaction, UpdateSavingsGoal, UpdateTransaction,
};

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid regex"));

/// Maximum length of names (accounts, goals)
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of transaction descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

fn invalid(msg: impl Into<String>) -> Error {
    Error::Validation(msg.into())
}

fn check_name(field: &str, name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(invalid(format!("{} is required", field)));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn check_positive(field: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(invalid(format!("{} must be positive", field)));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(invalid(format!("{} cannot be negative", field)));
    }
    Ok(())
}

fn check_description(description: Option<&str>) -> Result<()> {
    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(invalid(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}

fn check_currency(currency: &str) -> Result<()> {
    if currency.chars().count() != 3 {
        return Err(invalid("Currency must be a 3-letter code"));
    }
    Ok(())
}

/// Validate a `YYYY-MM` month string
pub fn validate_month(month: &str) -> Result<()> {
    if !MONTH_PATTERN.is_match(month) {
        return Err(invalid("Month must be in YYYY-MM format"));
    }
    let mm: u32 = month[5..]
        .parse()
        .map_err(|_| invalid("Month must be in YYYY-MM format"))?;
    if !(1..=12).contains(&mm) {
        return Err(invalid(format!("Invalid month: {}", month)));
    }
    Ok(())
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        check_name("Account name", &self.name)?;
        check_non_negative("Balance", self.balance)?;
        check_currency(&self.currency)
    }
}

impl UpdateAccount {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            check_name("Account name", name)?;
        }
        if let Some(balance) = self.balance {
            check_non_negative("Balance", balance)?;
        }
        if let Some(ref currency) = self.currency {
            check_currency(currency)?;
        }
        Ok(())
    }
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        check_positive("Account ID", self.account_id)?;
        check_positive("Amount", self.amount)?;
        check_description(self.description.as_deref())
    }
}

impl UpdateTransaction {
    pub fn validate(&self) -> Result<()> {
        if let Some(account_id) = self.account_id {
            check_positive("Account ID", account_id)?;
        }
        if let Some(amount) = self.amount {
            check_positive("Amount", amount)?;
        }
        check_description(self.description.as_deref())
    }
}

impl NewRecurringTransaction {
    pub fn validate(&self) -> Result<()> {
        check_positive("Account ID", self.account_id)?;
        check_positive("Amount", self.amount)?;
        check_description(self.description.as_deref())?;
        if let Some(end) = self.end_date {
            if end < self.next_occurrence_date {
                return Err(invalid("End date must not precede the next occurrence"));
            }
        }
        Ok(())
    }
}

impl UpdateRecurringTransaction {
    pub fn validate(&self) -> Result<()> {
        if let Some(account_id) = self.account_id {
            check_positive("Account ID", account_id)?;
        }
        if let Some(amount) = self.amount {
            check_positive("Amount", amount)?;
        }
        check_description(self.description.as_deref())
    }
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        check_positive("Limit", self.limit)?;
        validate_month(&self.month)
    }
}

impl UpdateBudget {
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            check_positive("Limit", limit)?;
        }
        if let Some(spent) = self.spent {
            check_non_negative("Spent", spent)?;
        }
        if let Some(ref month) = self.month {
            validate_month(month)?;
        }
        Ok(())
    }
}

impl NewSavingsGoal {
    pub fn validate(&self) -> Result<()> {
        check_name("Goal name", &self.name)?;
        check_positive("Target amount", self.target_amount)
    }
}

impl UpdateSavingsGoal {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            check_name("Goal name", name)?;
        }
        if let Some(target) = self.target_amount {
            check_positive("Target amount", target)?;
        }
        Ok(())
    }
}

/// Validate a savings goal progress value
pub fn validate_goal_progress(current_amount: i64) -> Result<()> {
    check_non_negative("Current amount", current_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Category, TransactionType};
    use chrono::{TimeZone, Utc};

    fn account(name: &str, balance: i64, currency: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            account_type: AccountType::BankAccount,
            balance,
            currency: currency.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_account_validation() {
        assert!(account("Checking", 0, "BRL").validate().is_ok());
        assert!(account("", 0, "BRL").validate().is_err());
        assert!(account("   ", 0, "BRL").validate().is_err());
        assert!(account(&"x".repeat(256), 0, "BRL").validate().is_err());
        assert!(account(&"x".repeat(255), 0, "BRL").validate().is_ok());
        assert!(account("Checking", -1, "BRL").validate().is_err());
        assert!(account("Checking", 0, "REAL").validate().is_err());
    }

    #[test]
    fn test_transaction_validation() {
        let mut tx = NewTransaction {
            account_id: 1,
            amount: 100,
            transaction_type: TransactionType::Expense,
            category: None,
            description: Some("Padaria".to_string()),
            transaction_date: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
            is_recurring: false,
            recurring_id: None,
        };
        assert!(tx.validate().is_ok());

        tx.amount = 0;
        assert!(tx.validate().is_err());

        tx.amount = 100;
        tx.description = Some("é".repeat(500));
        assert!(tx.validate().is_ok());
        tx.description = Some("é".repeat(501));
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_month_validation() {
        assert!(validate_month("2024-01").is_ok());
        assert!(validate_month("2024-12").is_ok());
        assert!(validate_month("2024-13").is_err());
        assert!(validate_month("2024-00").is_err());
        assert!(validate_month("2024-1").is_err());
        assert!(validate_month("24-01").is_err());
        assert!(validate_month("2024-01-01").is_err());
    }

    #[test]
    fn test_month_validation_rejects_non_ascii_digits() {
        assert!(matches!(
            validate_month("٢٠٢٤-٠٣"),
            Err(Error::Validation(_))
        ));
        assert!(validate_month("２０２４-０３").is_err());
        assert!(validate_month("2024-٠٣").is_err());
    }

    #[test]
    fn test_budget_validation() {
        let budget = NewBudget {
            category: Category::Food,
            limit: 0,
            month: "2024-03".to_string(),
        };
        assert!(matches!(budget.validate(), Err(Error::Validation(_))));

        let update = UpdateBudget {
            spent: Some(-5),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_goal_validation() {
        let goal = NewSavingsGoal {
            name: "Viagem".to_string(),
            target_amount: 500_000,
            target_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            description: None,
        };
        assert!(goal.validate().is_ok());
        assert!(validate_goal_progress(0).is_ok());
        assert!(validate_goal_progress(-1).is_err());
    }
}
