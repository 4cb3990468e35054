//! Report command implementations: dashboard, insights, spending, estimate

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tally_core::analytics::{CategorySpending, InsightKind};
use tally_core::db::Database;
use tally_core::money::{format_major_units, format_money};
use tally_core::period::{day_range_bounds, month_bounds};

use super::{parse_date, resolve_month};

/// Largest history window accepted by `tally estimate`
const MAX_ESTIMATE_MONTHS: usize = 24;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

fn print_category_bars(spending: &[CategorySpending]) {
    for item in spending {
        let bar_len = (item.percentage / 5.0).round() as usize;
        println!(
            "   {:<16} {:>10} {:>5.1}% {}",
            item.category.label(),
            format_major_units(item.amount),
            item.percentage,
            "█".repeat(bar_len)
        );
    }
}

pub fn cmd_dashboard(db: &Database, user_id: i64, month: Option<&str>, json: bool) -> Result<()> {
    let month = resolve_month(month)?;
    let summary = db.dashboard_summary(user_id, &month)?;

    if json {
        return print_json(&summary);
    }

    println!();
    println!("📊 Tally Dashboard ({})", summary.month);
    println!("   ─────────────────────────────");
    println!(
        "   Total balance:  {} across {} account(s)",
        format_money(summary.total_balance, "BRL"),
        summary.account_count
    );
    println!("   Income:         {}", format_major_units(summary.income));
    println!("   Expenses:       {}", format_major_units(summary.expenses));
    println!("   Month balance:  {}", format_major_units(summary.balance));
    println!("   Active goals:   {}", summary.goals_count);

    if !summary.category_spending.is_empty() {
        println!();
        println!("💸 Spending by Category");
        print_category_bars(&summary.category_spending);
    }

    let alerts: Vec<_> = summary.budget_alerts.iter().filter(|a| a.is_alert).collect();
    if !alerts.is_empty() {
        println!();
        for alert in alerts {
            println!(
                "   ⚠️  {} budget at {:.0}%",
                alert.category.label(),
                alert.percentage
            );
        }
    }

    Ok(())
}

pub fn cmd_insights(db: &Database, user_id: i64, month: Option<&str>, json: bool) -> Result<()> {
    let month = resolve_month(month)?;
    let insights = db.financial_insights(user_id, &month)?;

    if json {
        return print_json(&insights);
    }

    if insights.is_empty() {
        println!("No insights for {} yet. Record some transactions first.", month);
        return Ok(());
    }

    println!();
    println!("💡 Insights for {}", month);
    println!("   ─────────────────────────────");

    for insight in &insights {
        let icon = match insight.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Success => "🎉",
            InsightKind::Info => "ℹ️ ",
        };
        println!("   {} {}", icon, insight.title);
        println!("      {}", insight.description);
    }

    Ok(())
}

pub fn cmd_report_spending(
    db: &Database,
    user_id: i64,
    month: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let (start, end, label) = match (from, to) {
        (Some(from), Some(to)) => {
            let from_date = parse_date(from)?;
            let to_date = parse_date(to)?;
            if from_date > to_date {
                anyhow::bail!("--from must not be after --to");
            }
            let (start, end) = day_range_bounds(from_date, to_date)?;
            (start, end, format!("{} to {}", from, to))
        }
        (None, None) => {
            let month = resolve_month(month)?;
            let (start, end) = month_bounds(&month)?;
            (start, end, month)
        }
        _ => anyhow::bail!("--from and --to must be given together"),
    };

    let spending = db.category_spending(user_id, start, end)?;

    if json {
        return print_json(&spending);
    }

    if spending.is_empty() {
        println!("No expenses for {}.", label);
        return Ok(());
    }

    let total: i64 = spending.iter().map(|s| s.amount).sum();

    println!();
    println!("💸 Spending Report ({})", label);
    println!("   ─────────────────────────────────────────────");
    print_category_bars(&spending);
    println!("   ─────────────────────────────────────────────");
    println!("   {:<16} {:>10}", "Total", format_major_units(total));

    Ok(())
}

pub fn cmd_estimate(
    db: &Database,
    user_id: i64,
    month: Option<&str>,
    months: usize,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month)?;
    let months = months.clamp(1, MAX_ESTIMATE_MONTHS);
    let estimate = db.estimate_expenses(user_id, &month, months, Utc::now().date_naive())?;

    if json {
        return print_json(&estimate);
    }

    println!();
    println!("🔮 Expense Estimate for {}", estimate.month);
    println!("   ─────────────────────────────");
    for stats in &estimate.history {
        println!(
            "   {}  expenses {:>10}",
            stats.month,
            format_major_units(stats.expenses)
        );
    }
    println!();
    println!(
        "   Day {} of {}: projected {}",
        estimate.days_elapsed,
        estimate.total_days,
        format_major_units(estimate.estimate.round() as i64)
    );

    Ok(())
}
