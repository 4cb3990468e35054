//! Savings goal command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::{NewSavingsGoal, User};
use tally_core::money::{format_major_units, to_minor_units};

use super::{parse_day_start, truncate};

pub fn cmd_goals_list(db: &Database, user_id: i64) -> Result<()> {
    let goals = db.list_savings_goals(user_id)?;

    if goals.is_empty() {
        println!("No savings goals yet. Create one with:");
        println!("  tally goals add --name Viagem --target 5000 --target-date 2025-12-01");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in &goals {
        let progress = if goal.target_amount > 0 {
            goal.current_amount as f64 / goal.target_amount as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "   [{}] {:<20} │ {:>10} / {:>10} ({:>5.1}%) │ by {} │ {}",
            goal.id,
            truncate(&goal.name, 20),
            format_major_units(goal.current_amount),
            format_major_units(goal.target_amount),
            progress,
            goal.target_date.format("%Y-%m-%d"),
            goal.status
        );
    }

    Ok(())
}

pub fn cmd_goals_add(
    db: &Database,
    user: &User,
    name: &str,
    target: f64,
    target_date: &str,
    description: Option<&str>,
) -> Result<()> {
    let goal = db.create_savings_goal(
        user.id,
        &NewSavingsGoal {
            name: name.to_string(),
            target_amount: to_minor_units(target),
            target_date: parse_day_start(target_date)?,
            description: description.map(String::from),
        },
    )?;
    db.log_audit(&user.email, "create", Some("savings_goal"), Some(goal.id), None)?;

    println!(
        "✅ Created goal [{}] {} (target {})",
        goal.id,
        goal.name,
        format_major_units(goal.target_amount)
    );

    Ok(())
}

pub fn cmd_goals_progress(db: &Database, user: &User, id: i64, amount: f64) -> Result<()> {
    let goal = db
        .update_goal_progress(user.id, id, to_minor_units(amount))?
        .ok_or_else(|| anyhow::anyhow!("Savings goal {} not found", id))?;
    db.log_audit(&user.email, "update_progress", Some("savings_goal"), Some(id), None)?;

    println!(
        "✅ {}: {} of {} saved",
        goal.name,
        format_major_units(goal.current_amount),
        format_major_units(goal.target_amount)
    );

    Ok(())
}
