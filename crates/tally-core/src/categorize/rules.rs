//! Rule-based categorizer
//!
//! Scores every keyword found in the description by its length and keeps the
//! strongest match. Longer keywords are more specific, so they win over short
//! ones that happen to be substrings of unrelated words.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, TransactionType};

use super::keywords::CATEGORY_KEYWORDS;
use super::types::CategorizationResult;
use super::Categorizer;

/// Confidence assigned to income, which is never keyword-matched
pub const INCOME_CONFIDENCE: f64 = 0.5;

/// Confidence assigned when no keyword matches
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Base confidence of any keyword match
const BASE_MATCH_CONFIDENCE: f64 = 0.7;

/// Keyword length (in characters) that adds 1.0 to the base confidence
const LENGTH_SCALE: f64 = 50.0;

/// Confidence for a keyword hit: `min(1, 0.7 + chars/50)`
pub fn keyword_confidence(keyword: &str) -> f64 {
    let len = keyword.chars().count() as f64;
    (BASE_MATCH_CONFIDENCE + len / LENGTH_SCALE).min(1.0)
}

/// Categorize a transaction against the keyword table
///
/// Income is always `salary`. Expenses take the single highest-confidence
/// keyword hit; on ties the earlier category (then the earlier keyword) wins.
pub fn categorize_transaction(description: &str, kind: TransactionType) -> CategorizationResult {
    if kind == TransactionType::Income {
        return CategorizationResult::new(Category::Salary, INCOME_CONFIDENCE);
    }

    let normalized = description.to_lowercase();
    let normalized = normalized.trim();

    let mut best: Option<(Category, f64, &str)> = None;

    for (category, keywords) in CATEGORY_KEYWORDS {
        for keyword in *keywords {
            if !normalized.contains(keyword) {
                continue;
            }
            let confidence = keyword_confidence(keyword);
            if best.map_or(true, |(_, c, _)| confidence > c) {
                best = Some((*category, confidence, keyword));
            }
        }
    }

    match best {
        Some((category, confidence, keyword)) => {
            tracing::debug!(
                category = category.as_str(),
                keyword,
                confidence,
                "Keyword match"
            );
            CategorizationResult::new(category, confidence)
        }
        None => CategorizationResult::new(Category::Other, FALLBACK_CONFIDENCE),
    }
}

/// Categorizer backed by the static keyword table
#[derive(Clone, Default)]
pub struct RuleBasedCategorizer;

impl RuleBasedCategorizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Categorizer for RuleBasedCategorizer {
    async fn categorize(
        &self,
        description: &str,
        _amount: i64,
        kind: TransactionType,
    ) -> Result<CategorizationResult> {
        Ok(categorize_transaction(description, kind))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
