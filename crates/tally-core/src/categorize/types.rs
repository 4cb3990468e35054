//! Categorization result types

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Outcome of categorizing one transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub category: Category,
    /// Match strength in [0, 1]; a heuristic score, not a probability
    pub confidence: f64,
    /// Whether the category was assigned without user input
    pub automatic: bool,
}

impl CategorizationResult {
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence,
            automatic: true,
        }
    }

    /// A category chosen by the user
    pub fn manual(category: Category) -> Self {
        Self {
            category,
            confidence: 1.0,
            automatic: false,
        }
    }
}
