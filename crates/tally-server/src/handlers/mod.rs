//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod accounts;
pub mod analytics;
pub mod audit;
pub mod auth;
pub mod budgets;
pub mod categorize;
pub mod goals;
pub mod recurring;
pub mod transactions;

// Re-export all handlers for use in router
pub use accounts::*;
pub use analytics::*;
pub use audit::*;
pub use auth::*;
pub use budgets::*;
pub use categorize::*;
pub use goals::*;
pub use recurring::*;
pub use transactions::*;

use axum::body::Body;
use serde::{de::DeserializeOwned, Deserialize};

use crate::{AppError, MAX_BODY_SIZE};

/// Query parameters selecting a month (`YYYY-MM`, default current)
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Query parameters for a date range (`YYYY-MM-DD`, inclusive)
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: String,
    pub to: String,
}

/// Read and deserialize a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Parse a `YYYY-MM-DD` query parameter
pub(crate) fn parse_date(value: &str) -> Result<chrono::NaiveDate, AppError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid date: {} (expected YYYY-MM-DD)", value))
    })
}

/// Validate an optional `YYYY-MM` query parameter, defaulting to the current month
pub(crate) fn resolve_month(month: Option<&str>) -> Result<String, AppError> {
    match month {
        Some(m) => {
            tally_core::validation::validate_month(m)?;
            Ok(m.to_string())
        }
        None => Ok(tally_core::period::current_month()),
    }
}
