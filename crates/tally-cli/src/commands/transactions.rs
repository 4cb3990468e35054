//! Transaction command implementations

use anyhow::Result;
use chrono::Utc;
use tally_core::categorize::{resolve_category, CategorizerClient};
use tally_core::db::Database;
use tally_core::models::{Category, NewTransaction, TransactionType, User};
use tally_core::money::{format_major_units, to_minor_units};

use super::{parse_arg, parse_day_start, truncate};

/// Arguments for `tally transactions add`
pub struct NewTransactionArgs {
    pub account_id: i64,
    pub amount: f64,
    pub kind: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

pub fn cmd_transactions_list(db: &Database, user_id: i64, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(user_id, limit, 0)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions add --account 1 --amount 45.90 -d \"iFood\"");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.transaction_type {
            TransactionType::Expense => {
                format!("\x1b[31m-{}\x1b[0m", format_major_units(tx.amount)) // Red for expenses
            }
            TransactionType::Income => {
                format!("\x1b[32m+{}\x1b[0m", format_major_units(tx.amount)) // Green for income
            }
        };
        let marker = if tx.categorized_automatically { "*" } else { " " };

        println!(
            "   [{}] {} │ {:>12} │ {:<14}{} │ {}",
            tx.id,
            tx.transaction_date.format("%Y-%m-%d"),
            amount_str,
            tx.category.as_str(),
            marker,
            truncate(tx.description.as_deref().unwrap_or(""), 36)
        );
    }

    println!();
    println!("   * categorized automatically");

    Ok(())
}

pub async fn cmd_transactions_add(
    db: &Database,
    user: &User,
    args: NewTransactionArgs,
) -> Result<()> {
    let kind: TransactionType = parse_arg(&args.kind)?;
    let category: Option<Category> = args.category.as_deref().map(parse_arg::<Category>).transpose()?;
    let transaction_date = match args.date.as_deref() {
        Some(date) => parse_day_start(date)?,
        None => Utc::now(),
    };

    let new_tx = NewTransaction {
        account_id: args.account_id,
        amount: to_minor_units(args.amount),
        transaction_type: kind,
        category,
        description: args.description,
        transaction_date,
        is_recurring: false,
        recurring_id: None,
    };
    new_tx.validate()?;

    let categorizer = CategorizerClient::from_env();
    let result = resolve_category(
        &categorizer,
        new_tx.category,
        new_tx.description.as_deref(),
        new_tx.amount,
        kind,
    )
    .await?;
    let confidence = result.confidence;

    let tx = db.create_transaction(user.id, &new_tx, result)?;
    db.log_audit(&user.email, "create", Some("transaction"), Some(tx.id), None)?;

    println!(
        "✅ Recorded transaction [{}]: {} {}",
        tx.id,
        tx.transaction_type,
        format_major_units(tx.amount)
    );
    if tx.categorized_automatically {
        println!(
            "   🏷️  Category: {} (auto, {:.0}% confidence)",
            tx.category.label(),
            confidence * 100.0
        );
    } else {
        println!("   🏷️  Category: {}", tx.category.label());
    }

    Ok(())
}

pub fn cmd_transactions_recategorize(
    db: &Database,
    user: &User,
    id: i64,
    category: &str,
) -> Result<()> {
    let category: Category = parse_arg(category)?;

    let tx = db
        .update_transaction_category(user.id, id, category)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;
    db.log_audit(
        &user.email,
        "update_category",
        Some("transaction"),
        Some(id),
        Some(category.as_str()),
    )?;

    println!("✅ Transaction {} is now {}", tx.id, tx.category.label());

    Ok(())
}
