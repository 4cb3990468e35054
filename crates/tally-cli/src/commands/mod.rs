//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, user resolution, argument parsing)
//! - `accounts` - Account commands (list, add)
//! - `transactions` - Transaction commands (list, add, recategorize)
//! - `budgets` - Budget commands (list, add, alerts)
//! - `goals` - Savings goal commands (list, add, progress)
//! - `categorize` - Categorization preview
//! - `reports` - Dashboard, insights, spending report, expense estimate
//! - `serve` - Web server command

pub mod accounts;
pub mod budgets;
pub mod categorize;
pub mod core;
pub mod goals;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use accounts::*;
pub use budgets::*;
pub use categorize::*;
pub use core::*;
pub use goals::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
