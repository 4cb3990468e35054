//! Categorization preview handler

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;

use super::read_json;
use crate::{get_user_email, AppError, AppState};
use tally_core::models::TransactionType;
use tally_core::{CategorizationResult, Categorizer};

/// Request body for a categorization preview
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub description: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// POST /api/categorize - Suggest a category without storing anything
pub async fn categorize(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<CategorizationResult>, AppError> {
    let user_email = get_user_email(request.headers());
    let req: CategorizeRequest = read_json(request.into_body()).await?;

    let result = state
        .categorizer
        .categorize(&req.description, req.amount, req.transaction_type)
        .await?;

    state.db.log_audit(
        &user_email,
        "categorize",
        Some("transaction"),
        None,
        Some(&format!(
            "category={}, confidence={:.2}, categorizer={}",
            result.category,
            result.confidence,
            state.categorizer.name()
        )),
    )?;

    Ok(Json(result))
}
