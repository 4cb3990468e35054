//! Mock categorizer for testing
//!
//! Always answers with a fixed category so callers can be tested without
//! depending on the keyword table.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, TransactionType};

use super::types::CategorizationResult;
use super::Categorizer;

/// Mock categorizer with a configurable answer
#[derive(Clone)]
pub struct MockCategorizer {
    pub category: Category,
    pub confidence: f64,
}

impl Default for MockCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCategorizer {
    /// Create a mock that categorizes everything as `other`
    pub fn new() -> Self {
        Self {
            category: Category::Other,
            confidence: 1.0,
        }
    }

    /// Create a mock that always returns `category`
    pub fn returning(category: Category) -> Self {
        Self {
            category,
            confidence: 1.0,
        }
    }
}

#[async_trait]
impl Categorizer for MockCategorizer {
    async fn categorize(
        &self,
        _description: &str,
        _amount: i64,
        _kind: TransactionType,
    ) -> Result<CategorizationResult> {
        Ok(CategorizationResult::new(self.category, self.confidence))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
