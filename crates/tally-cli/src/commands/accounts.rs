//! Account command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::{AccountType, NewAccount, User};
use tally_core::money::{format_money, to_minor_units};

use super::{parse_arg, truncate};

pub fn cmd_accounts_list(db: &Database, user_id: i64) -> Result<()> {
    let accounts = db.list_accounts(user_id)?;

    if accounts.is_empty() {
        println!("No accounts found. Create one with:");
        println!("  tally accounts add --name Nubank");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts");
    println!("   ─────────────────────────────────────────────────────");

    for account in &accounts {
        println!(
            "   [{}] {:<24} │ {:<14} │ {:>14}",
            account.id,
            truncate(&account.name, 24),
            account.account_type.as_str(),
            format_money(account.balance, &account.currency)
        );
    }

    Ok(())
}

pub fn cmd_accounts_add(
    db: &Database,
    user: &User,
    name: &str,
    kind: &str,
    balance: f64,
    currency: &str,
    description: Option<&str>,
) -> Result<()> {
    let account_type: AccountType = parse_arg(kind)?;

    let account = db.create_account(
        user.id,
        &NewAccount {
            name: name.to_string(),
            account_type,
            balance: to_minor_units(balance),
            currency: currency.to_uppercase(),
            description: description.map(String::from),
        },
    )?;
    db.log_audit(&user.email, "create", Some("account"), Some(account.id), None)?;

    println!(
        "✅ Created account [{}] {} ({})",
        account.id,
        account.name,
        format_money(account.balance, &account.currency)
    );

    Ok(())
}
