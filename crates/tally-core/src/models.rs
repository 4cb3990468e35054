//! Domain models for Tally
//!
//! All monetary values are integer minor currency units (cents).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spending category
///
/// The declaration order is significant: categorization scans categories in
/// this order and the first best match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transportation,
    Health,
    Education,
    Entertainment,
    Subscriptions,
    Utilities,
    Insurance,
    Salary,
    Investment,
    Other,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 11] = [
        Self::Food,
        Self::Transportation,
        Self::Health,
        Self::Education,
        Self::Entertainment,
        Self::Subscriptions,
        Self::Utilities,
        Self::Insurance,
        Self::Salary,
        Self::Investment,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Health => "health",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Subscriptions => "subscriptions",
            Self::Utilities => "utilities",
            Self::Insurance => "insurance",
            Self::Salary => "salary",
            Self::Investment => "investment",
            Self::Other => "other",
        }
    }

    /// Human-readable name for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Subscriptions => "Subscriptions",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::Salary => "Salary",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transportation" => Ok(Self::Transportation),
            "health" => Ok(Self::Health),
            "education" => Ok(Self::Education),
            "entertainment" => Ok(Self::Entertainment),
            "subscriptions" => Ok(Self::Subscriptions),
            "utilities" => Ok(Self::Utilities),
            "insurance" => Ok(Self::Insurance),
            "salary" => Ok(Self::Salary),
            "investment" => Ok(Self::Investment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of money movement. Amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    BankAccount,
    Savings,
    CreditCard,
    DigitalWallet,
    Investment,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BankAccount => "bank_account",
            Self::Savings => "savings",
            Self::CreditCard => "credit_card",
            Self::DigitalWallet => "digital_wallet",
            Self::Investment => "investment",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank_account" | "bank" | "checking" => Ok(Self::BankAccount),
            "savings" => Ok(Self::Savings),
            "credit_card" | "credit" => Ok(Self::CreditCard),
            "digital_wallet" | "wallet" => Ok(Self::DigitalWallet),
            "investment" => Ok(Self::Investment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial account owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Current balance in minor units
    pub balance: i64,
    /// ISO 4217 currency code
    pub currency: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "BRL".to_string()
}

/// Input for creating an account
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub description: Option<String>,
}

/// Partial account update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    pub balance: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    /// Positive amount in minor units; direction is carried by `transaction_type`
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    pub description: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_id: Option<i64>,
    /// Whether `category` was assigned by the categorizer rather than the user
    pub categorized_automatically: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a transaction
///
/// When `category` is absent the transaction is categorized automatically.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub transaction_date: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_id: Option<i64>,
}

/// Partial transaction update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransaction {
    pub account_id: Option<i64>,
    pub amount: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub is_recurring: Option<bool>,
    pub recurring_id: Option<i64>,
}

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a recurring transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl RecurringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for RecurringStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown recurring status: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A template for a transaction that repeats on a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub next_occurrence_date: DateTime<Utc>,
    pub status: RecurringStatus,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a recurring transaction
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecurringTransaction {
    pub account_id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub next_occurrence_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial recurring transaction update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecurringTransaction {
    pub account_id: Option<i64>,
    pub amount: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub next_occurrence_date: Option<DateTime<Utc>>,
    pub status: Option<RecurringStatus>,
    pub end_date: Option<DateTime<Utc>>,
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    pub limit: i64,
    pub spent: i64,
    /// Month in `YYYY-MM` form
    pub month: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a budget (spent starts at zero)
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    pub category: Category,
    pub limit: i64,
    pub month: String,
}

/// Partial budget update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBudget {
    pub category: Option<Category>,
    pub limit: Option<i64>,
    pub month: Option<String>,
    pub spent: Option<i64>,
}

/// Savings goal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Abandoned,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings target with progress tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub target_date: DateTime<Utc>,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a savings goal (progress starts at zero, status active)
#[derive(Debug, Clone, Deserialize)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: i64,
    pub target_date: DateTime<Utc>,
    pub description: Option<String>,
}

/// Partial savings goal update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSavingsGoal {
    pub name: Option<String>,
    pub target_amount: Option<i64>,
    pub target_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: Option<GoalStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order_matches_declaration() {
        assert_eq!(Category::ALL[0], Category::Food);
        assert_eq!(Category::ALL[10], Category::Other);
    }

    #[test]
    fn test_account_type_aliases() {
        assert_eq!("checking".parse::<AccountType>().unwrap(), AccountType::BankAccount);
        assert_eq!("credit".parse::<AccountType>().unwrap(), AccountType::CreditCard);
        assert_eq!(AccountType::DigitalWallet.as_str(), "digital_wallet");
    }

    #[test]
    fn test_new_account_defaults() {
        let account: NewAccount =
            serde_json::from_str(r#"{"name": "Nubank", "type": "bank_account"}"#).unwrap();
        assert_eq!(account.currency, "BRL");
        assert_eq!(account.balance, 0);
        assert_eq!(account.account_type, AccountType::BankAccount);
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let json = serde_json::to_value(TransactionType::Expense).unwrap();
        assert_eq!(json, "expense");
        let parsed: NewTransaction = serde_json::from_str(
            r#"{"account_id": 1, "amount": 500, "type": "expense", "transaction_date": "2024-03-05T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(parsed.category.is_none());
        assert!(!parsed.is_recurring);
    }
}
