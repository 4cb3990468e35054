//! Savings goal operations

use rusqlite::{params, OptionalExtension};

use super::{format_datetime, parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{GoalStatus, NewSavingsGoal, SavingsGoal, UpdateSavingsGoal};
use crate::validation::validate_goal_progress;

const GOAL_COLUMNS: &str = r#"
    id, user_id, name, target_amount, current_amount, target_date, description, status,
    created_at, updated_at
"#;

fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<SavingsGoal> {
    let target_date: String = row.get(5)?;
    let status: String = row.get(7)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(SavingsGoal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        target_amount: row.get(3)?,
        current_amount: row.get(4)?,
        target_date: parse_datetime(5, &target_date)?,
        description: row.get(6)?,
        status: parse_column::<GoalStatus>(7, &status)?,
        created_at: parse_datetime(8, &created_at)?,
        updated_at: parse_datetime(9, &updated_at)?,
    })
}

impl Database {
    /// List a user's savings goals by target date
    pub fn list_savings_goals(&self, user_id: i64) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM savings_goals WHERE user_id = ? ORDER BY target_date, id",
            GOAL_COLUMNS
        ))?;

        let goals = stmt
            .query_map(params![user_id], row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Get a savings goal by ID
    pub fn get_savings_goal(&self, user_id: i64, id: i64) -> Result<Option<SavingsGoal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!(
                    "SELECT {} FROM savings_goals WHERE id = ? AND user_id = ?",
                    GOAL_COLUMNS
                ),
                params![id, user_id],
                row_to_goal,
            )
            .optional()?;

        Ok(goal)
    }

    /// Create a goal with no progress and `active` status
    pub fn create_savings_goal(&self, user_id: i64, goal: &NewSavingsGoal) -> Result<SavingsGoal> {
        goal.validate()?;
        let id = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                INSERT INTO savings_goals (user_id, name, target_amount, target_date, description, status)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
                params![
                    user_id,
                    goal.name,
                    goal.target_amount,
                    format_datetime(&goal.target_date),
                    goal.description,
                    GoalStatus::Active.as_str(),
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.get_savings_goal(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Savings goal {} not found", id)))
    }

    /// Apply a partial update; `None` when the goal does not exist
    pub fn update_savings_goal(
        &self,
        user_id: i64,
        id: i64,
        updates: &UpdateSavingsGoal,
    ) -> Result<Option<SavingsGoal>> {
        updates.validate()?;
        let Some(existing) = self.get_savings_goal(user_id, id)? else {
            return Ok(None);
        };

        {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE savings_goals
                SET name = ?, target_amount = ?, target_date = ?, description = ?, status = ?,
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![
                    updates.name.as_ref().unwrap_or(&existing.name),
                    updates.target_amount.unwrap_or(existing.target_amount),
                    format_datetime(&updates.target_date.unwrap_or(existing.target_date)),
                    updates.description.as_ref().or(existing.description.as_ref()),
                    updates.status.unwrap_or(existing.status).as_str(),
                    id,
                    user_id,
                ],
            )?;
        }

        self.get_savings_goal(user_id, id)
    }

    /// Set the amount saved so far; `None` when the goal does not exist
    pub fn update_goal_progress(
        &self,
        user_id: i64,
        id: i64,
        current_amount: i64,
    ) -> Result<Option<SavingsGoal>> {
        validate_goal_progress(current_amount)?;
        let updated = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE savings_goals
                SET current_amount = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![current_amount, id, user_id],
            )?
        };

        if updated == 0 {
            return Ok(None);
        }
        self.get_savings_goal(user_id, id)
    }

    /// Delete a savings goal; `false` when it does not exist
    pub fn delete_savings_goal(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM savings_goals WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}
