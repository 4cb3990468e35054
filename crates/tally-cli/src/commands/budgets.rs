//! Budget command implementations

use anyhow::Result;
use tally_core::analytics::generate_budget_alerts;
use tally_core::db::Database;
use tally_core::models::{Category, NewBudget, User};
use tally_core::money::{format_major_units, to_minor_units};

use super::{parse_arg, resolve_month};

pub fn cmd_budgets_list(db: &Database, user_id: i64, month: Option<&str>) -> Result<()> {
    let month = resolve_month(month)?;
    let budgets = db.list_budgets(user_id, &month)?;

    if budgets.is_empty() {
        println!("No budgets for {}. Create one with:", month);
        println!("  tally budgets add --category food --limit 800");
        return Ok(());
    }

    println!();
    println!("💰 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────");

    for budget in &budgets {
        println!(
            "   [{}] {:<16} │ {:>10} / {:>10}",
            budget.id,
            budget.category.label(),
            format_major_units(budget.spent),
            format_major_units(budget.limit)
        );
    }

    Ok(())
}

pub fn cmd_budgets_add(
    db: &Database,
    user: &User,
    category: &str,
    limit: f64,
    month: Option<&str>,
) -> Result<()> {
    let category: Category = parse_arg(category)?;
    let month = resolve_month(month)?;

    let budget = db.create_budget(
        user.id,
        &NewBudget {
            category,
            limit: to_minor_units(limit),
            month,
        },
    )?;
    db.log_audit(&user.email, "create", Some("budget"), Some(budget.id), None)?;

    println!(
        "✅ Created {} budget of {} for {}",
        budget.category.label(),
        format_major_units(budget.limit),
        budget.month
    );

    Ok(())
}

pub fn cmd_budgets_alerts(db: &Database, user_id: i64, month: Option<&str>) -> Result<()> {
    let month = resolve_month(month)?;
    let budgets = db.list_budgets(user_id, &month)?;
    let alerts = generate_budget_alerts(&budgets);

    if alerts.is_empty() {
        println!("No budgets for {}.", month);
        return Ok(());
    }

    println!();
    println!("🚨 Budget Utilization for {}", month);
    println!("   ─────────────────────────────────────────────");

    for alert in &alerts {
        let icon = if alert.is_alert { "⚠️ " } else { "✅" };
        println!(
            "   {} {:<16} │ {:>6.1}% │ {} of {}",
            icon,
            alert.category.label(),
            alert.percentage,
            format_major_units(alert.spent),
            format_major_units(alert.limit)
        );
    }

    let over = alerts.iter().filter(|a| a.is_alert).count();
    if over > 0 {
        println!();
        println!("⚠️  {} budget(s) at or above 80% of the limit.", over);
    }

    Ok(())
}
