//! Pluggable transaction categorization
//!
//! # Architecture
//!
//! - `Categorizer` trait: maps a description, amount and type to a category
//! - `CategorizerClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Implementations: `RuleBasedCategorizer` (keyword table), `MockCategorizer`
//!
//! The trait is async so a model-backed implementation can be added without
//! touching callers; the rule-based implementation resolves immediately.
//!
//! # Configuration
//!
//! Environment variables:
//! - `TALLY_CATEGORIZER`: Implementation to use (rules, mock). Default: rules

mod keywords;
mod mock;
mod rules;
pub mod types;

pub use keywords::{keywords_for, CATEGORY_KEYWORDS};
pub use mock::MockCategorizer;
pub use rules::{categorize_transaction, keyword_confidence, RuleBasedCategorizer};
pub use types::CategorizationResult;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, TransactionType};

/// Environment variable selecting the categorizer implementation
pub const CATEGORIZER_ENV: &str = "TALLY_CATEGORIZER";

/// Interface for all categorizers
#[async_trait]
pub trait Categorizer: Send + Sync {
    /// Assign a category to a transaction
    async fn categorize(
        &self,
        description: &str,
        amount: i64,
        kind: TransactionType,
    ) -> Result<CategorizationResult>;

    /// Short identifier for logging
    fn name(&self) -> &'static str;
}

/// Keep an explicit category, otherwise ask the categorizer
pub async fn resolve_category<C: Categorizer + ?Sized>(
    categorizer: &C,
    explicit: Option<Category>,
    description: Option<&str>,
    amount: i64,
    kind: TransactionType,
) -> Result<CategorizationResult> {
    match explicit {
        Some(category) => Ok(CategorizationResult::manual(category)),
        None => {
            categorizer
                .categorize(description.unwrap_or_default(), amount, kind)
                .await
        }
    }
}

/// Concrete categorizer enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum CategorizerClient {
    /// Keyword table matching
    RuleBased(RuleBasedCategorizer),
    /// Fixed answers for testing
    Mock(MockCategorizer),
}

impl Default for CategorizerClient {
    fn default() -> Self {
        Self::rules()
    }
}

impl CategorizerClient {
    /// Create a categorizer from `TALLY_CATEGORIZER`
    ///
    /// Unknown values fall back to the rule-based categorizer.
    pub fn from_env() -> Self {
        let kind = std::env::var(CATEGORIZER_ENV).unwrap_or_else(|_| "rules".to_string());

        match kind.to_lowercase().as_str() {
            "rules" | "rule_based" | "keywords" => Self::rules(),
            "mock" => Self::mock(),
            _ => {
                tracing::warn!(categorizer = %kind, "Unknown TALLY_CATEGORIZER, falling back to rules");
                Self::rules()
            }
        }
    }

    /// Create the keyword-table categorizer
    pub fn rules() -> Self {
        CategorizerClient::RuleBased(RuleBasedCategorizer::new())
    }

    /// Create a mock categorizer for testing
    pub fn mock() -> Self {
        CategorizerClient::Mock(MockCategorizer::new())
    }
}

#[async_trait]
impl Categorizer for CategorizerClient {
    async fn categorize(
        &self,
        description: &str,
        amount: i64,
        kind: TransactionType,
    ) -> Result<CategorizationResult> {
        match self {
            CategorizerClient::RuleBased(c) => c.categorize(description, amount, kind).await,
            CategorizerClient::Mock(c) => c.categorize(description, amount, kind).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CategorizerClient::RuleBased(c) => c.name(),
            CategorizerClient::Mock(c) => c.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults_to_rules() {
        assert_eq!(CategorizerClient::default().name(), "rules");
        assert_eq!(CategorizerClient::mock().name(), "mock");
    }

    #[tokio::test]
    async fn test_client_delegates_to_rules() {
        let client = CategorizerClient::rules();
        let result = client
            .categorize("Spotify Premium", 2190, TransactionType::Expense)
            .await
            .unwrap();
        assert_eq!(result.category, Category::Entertainment);
        assert!(result.automatic);
    }

    #[tokio::test]
    async fn test_mock_returns_configured_category() {
        let client = CategorizerClient::Mock(MockCategorizer::returning(Category::Insurance));
        let result = client
            .categorize("anything", 100, TransactionType::Expense)
            .await
            .unwrap();
        assert_eq!(result.category, Category::Insurance);
        assert_eq!(result.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_resolve_category_prefers_explicit() {
        let client = CategorizerClient::rules();

        let explicit = resolve_category(
            &client,
            Some(Category::Health),
            Some("Pizza"),
            100,
            TransactionType::Expense,
        )
        .await
        .unwrap();
        assert_eq!(explicit.category, Category::Health);
        assert!(!explicit.automatic);

        let inferred = resolve_category(&client, None, Some("Pizza"), 100, TransactionType::Expense)
            .await
            .unwrap();
        assert_eq!(inferred.category, Category::Food);
        assert!(inferred.automatic);

        let blank = resolve_category(&client, None, None, 100, TransactionType::Income)
            .await
            .unwrap();
        assert_eq!(blank.category, Category::Salary);
    }
}
