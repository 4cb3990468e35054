//! Recurring transaction templates

use rusqlite::{params, OptionalExtension};

use super::{format_datetime, parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{
    Category, Frequency, NewRecurringTransaction, RecurringStatus, RecurringTransaction,
    TransactionType, UpdateRecurringTransaction,
};

const RECURRING_COLUMNS: &str = r#"
    id, user_id, account_id, amount, transaction_type, category, description,
    frequency, next_occurrence_date, status, end_date, created_at, updated_at
"#;

fn row_to_recurring(row: &rusqlite::Row) -> rusqlite::Result<RecurringTransaction> {
    let transaction_type: String = row.get(4)?;
    let category: String = row.get(5)?;
    let frequency: String = row.get(7)?;
    let next_occurrence: String = row.get(8)?;
    let status: String = row.get(9)?;
    let end_date: Option<String> = row.get(10)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;

    Ok(RecurringTransaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        amount: row.get(3)?,
        transaction_type: parse_column::<TransactionType>(4, &transaction_type)?,
        category: parse_column::<Category>(5, &category)?,
        description: row.get(6)?,
        frequency: parse_column::<Frequency>(7, &frequency)?,
        next_occurrence_date: parse_datetime(8, &next_occurrence)?,
        status: parse_column::<RecurringStatus>(9, &status)?,
        end_date: end_date
            .as_deref()
            .map(|s| parse_datetime(10, s))
            .transpose()?,
        created_at: parse_datetime(11, &created_at)?,
        updated_at: parse_datetime(12, &updated_at)?,
    })
}

impl Database {
    /// List a user's recurring transactions by next occurrence
    pub fn list_recurring_transactions(&self, user_id: i64) -> Result<Vec<RecurringTransaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recurring_transactions WHERE user_id = ? ORDER BY next_occurrence_date, id",
            RECURRING_COLUMNS
        ))?;

        let recurring = stmt
            .query_map(params![user_id], row_to_recurring)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recurring)
    }

    /// Get a recurring transaction by ID
    pub fn get_recurring_transaction(
        &self,
        user_id: i64,
        id: i64,
    ) -> Result<Option<RecurringTransaction>> {
        let conn = self.conn()?;
        let recurring = conn
            .query_row(
                &format!(
                    "SELECT {} FROM recurring_transactions WHERE id = ? AND user_id = ?",
                    RECURRING_COLUMNS
                ),
                params![id, user_id],
                row_to_recurring,
            )
            .optional()?;

        Ok(recurring)
    }

    /// Create a recurring transaction (status starts `active`)
    pub fn create_recurring_transaction(
        &self,
        user_id: i64,
        recurring: &NewRecurringTransaction,
    ) -> Result<RecurringTransaction> {
        recurring.validate()?;
        self.ensure_account_owned(user_id, recurring.account_id)?;

        let id = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                INSERT INTO recurring_transactions (
                    user_id, account_id, amount, transaction_type, category, description,
                    frequency, next_occurrence_date, status, end_date
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    user_id,
                    recurring.account_id,
                    recurring.amount,
                    recurring.transaction_type.as_str(),
                    recurring.category.as_str(),
                    recurring.description,
                    recurring.frequency.as_str(),
                    format_datetime(&recurring.next_occurrence_date),
                    RecurringStatus::Active.as_str(),
                    recurring.end_date.as_ref().map(format_datetime),
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.get_recurring_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Recurring transaction {} not found", id)))
    }

    /// Apply a partial update; `None` when the template does not exist
    pub fn update_recurring_transaction(
        &self,
        user_id: i64,
        id: i64,
        updates: &UpdateRecurringTransaction,
    ) -> Result<Option<RecurringTransaction>> {
        updates.validate()?;
        let Some(existing) = self.get_recurring_transaction(user_id, id)? else {
            return Ok(None);
        };

        let account_id = updates.account_id.unwrap_or(existing.account_id);
        if account_id != existing.account_id {
            self.ensure_account_owned(user_id, account_id)?;
        }

        let next_occurrence = updates
            .next_occurrence_date
            .unwrap_or(existing.next_occurrence_date);
        let end_date = updates.end_date.or(existing.end_date);
        if let Some(end) = end_date {
            if end < next_occurrence {
                return Err(Error::Validation(
                    "End date must not precede the next occurrence".to_string(),
                ));
            }
        }

        {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE recurring_transactions
                SET account_id = ?, amount = ?, transaction_type = ?, category = ?,
                    description = ?, frequency = ?, next_occurrence_date = ?, status = ?,
                    end_date = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![
                    account_id,
                    updates.amount.unwrap_or(existing.amount),
                    updates
                        .transaction_type
                        .unwrap_or(existing.transaction_type)
                        .as_str(),
                    updates.category.unwrap_or(existing.category).as_str(),
                    updates.description.as_ref().or(existing.description.as_ref()),
                    updates.frequency.unwrap_or(existing.frequency).as_str(),
                    format_datetime(&next_occurrence),
                    updates.status.unwrap_or(existing.status).as_str(),
                    end_date.as_ref().map(format_datetime),
                    id,
                    user_id,
                ],
            )?;
        }

        self.get_recurring_transaction(user_id, id)
    }

    /// Delete a recurring transaction; `false` when it does not exist
    ///
    /// Transactions generated from it keep their data and lose the link.
    pub fn delete_recurring_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM recurring_transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}
