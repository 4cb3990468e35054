//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_for_user` - Open the database (and resolve the acting user)
//! - `cmd_init` - Initialize the database
//! - Parsers for the string arguments clap hands us

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use tally_core::db::Database;
use tally_core::models::User;
use tally_core::period::current_month;
use tally_core::validation::validate_month;

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    tracing::debug!(path = path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Open the database and upsert the user the command acts for
pub fn open_for_user(db_path: &Path, email: &str) -> Result<(Database, User)> {
    let db = open_db(db_path)?;
    let user = db
        .upsert_user(email)
        .with_context(|| format!("Failed to resolve user {}", email))?;
    Ok((db, user))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    db.upsert_user("local-dev")
        .context("Failed to create local user")?;
    println!("   Created local user (local-dev)");

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create an account: tally accounts add --name Nubank");
    println!("  2. Record spending: tally transactions add --account 1 --amount 45.90 -d \"iFood\"");
    println!("  3. Start web UI: tally serve");

    Ok(())
}

/// Parse one of the model enums from a CLI argument
pub fn parse_arg<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    value.parse::<T>().map_err(anyhow::Error::msg)
}

/// Validate `--month`, defaulting to the current month
pub fn resolve_month(month: Option<&str>) -> Result<String> {
    match month {
        Some(m) => {
            validate_month(m)?;
            Ok(m.to_string())
        }
        None => Ok(current_month()),
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date {} (use YYYY-MM-DD)", value))
}

/// Midnight UTC at the start of a `YYYY-MM-DD` date
pub fn parse_day_start(value: &str) -> Result<DateTime<Utc>> {
    let date = parse_date(value)?;
    let start = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date {}", value))?;
    Ok(start.and_utc())
}
