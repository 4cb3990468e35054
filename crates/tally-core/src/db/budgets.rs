//! Monthly budget operations

use rusqlite::{params, OptionalExtension};

use super::{parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, NewBudget, UpdateBudget};

const BUDGET_COLUMNS: &str =
    "id, user_id, category, limit_amount, spent, month, created_at, updated_at";

fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
    let category: String = row.get(2)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: parse_column::<Category>(2, &category)?,
        limit: row.get(3)?,
        spent: row.get(4)?,
        month: row.get(5)?,
        created_at: parse_datetime(6, &created_at)?,
        updated_at: parse_datetime(7, &updated_at)?,
    })
}

impl Database {
    /// List a user's budgets for one month (`YYYY-MM`)
    pub fn list_budgets(&self, user_id: i64, month: &str) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets WHERE user_id = ? AND month = ? ORDER BY id",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id, month], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Get a budget by ID
    pub fn get_budget(&self, user_id: i64, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!(
                    "SELECT {} FROM budgets WHERE id = ? AND user_id = ?",
                    BUDGET_COLUMNS
                ),
                params![id, user_id],
                row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    /// Create a budget; spending starts at zero
    pub fn create_budget(&self, user_id: i64, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;
        let id = {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO budgets (user_id, category, limit_amount, month) VALUES (?, ?, ?, ?)",
                params![user_id, budget.category.as_str(), budget.limit, budget.month],
            )?;
            conn.last_insert_rowid()
        };

        self.get_budget(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {} not found", id)))
    }

    /// Apply a partial update; `None` when the budget does not exist
    pub fn update_budget(
        &self,
        user_id: i64,
        id: i64,
        updates: &UpdateBudget,
    ) -> Result<Option<Budget>> {
        updates.validate()?;
        let Some(existing) = self.get_budget(user_id, id)? else {
            return Ok(None);
        };

        {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE budgets
                SET category = ?, limit_amount = ?, month = ?, spent = ?,
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![
                    updates.category.unwrap_or(existing.category).as_str(),
                    updates.limit.unwrap_or(existing.limit),
                    updates.month.as_ref().unwrap_or(&existing.month),
                    updates.spent.unwrap_or(existing.spent),
                    id,
                    user_id,
                ],
            )?;
        }

        self.get_budget(user_id, id)
    }

    /// Delete a budget; `false` when it does not exist
    pub fn delete_budget(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}
