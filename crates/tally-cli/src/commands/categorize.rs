//! Categorization preview command

use anyhow::Result;
use tally_core::categorize::{Categorizer, CategorizerClient};
use tally_core::models::TransactionType;
use tally_core::money::to_minor_units;

use super::parse_arg;

pub async fn cmd_categorize(description: &str, amount: f64, kind: &str) -> Result<()> {
    let kind: TransactionType = parse_arg(kind)?;
    let categorizer = CategorizerClient::from_env();

    let result = categorizer
        .categorize(description, to_minor_units(amount), kind)
        .await?;

    println!("🏷️  {} → {}", description, result.category.label());
    println!(
        "   Confidence: {:.0}% ({} categorizer)",
        result.confidence * 100.0,
        categorizer.name()
    );

    Ok(())
}
