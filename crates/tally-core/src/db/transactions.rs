//! Transaction operations

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::{format_datetime, parse_column, parse_datetime, Database};
use crate::categorize::CategorizationResult;
use crate::error::{Error, Result};
use crate::models::{Category, NewTransaction, Transaction, TransactionType, UpdateTransaction};

const TRANSACTION_COLUMNS: &str = r#"
    id, user_id, account_id, amount, transaction_type, category, description,
    transaction_date, is_recurring, recurring_id, categorized_automatically,
    created_at, updated_at
"#;

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let transaction_type: String = row.get(4)?;
    let category: String = row.get(5)?;
    let transaction_date: String = row.get(7)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        amount: row.get(3)?,
        transaction_type: parse_column::<TransactionType>(4, &transaction_type)?,
        category: parse_column::<Category>(5, &category)?,
        description: row.get(6)?,
        transaction_date: parse_datetime(7, &transaction_date)?,
        is_recurring: row.get(8)?,
        recurring_id: row.get(9)?,
        categorized_automatically: row.get(10)?,
        created_at: parse_datetime(11, &created_at)?,
        updated_at: parse_datetime(12, &updated_at)?,
    })
}

impl Database {
    /// List a user's transactions, newest first
    pub fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM transactions
            WHERE user_id = ?
            ORDER BY transaction_date DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id, limit, offset], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Transactions dated within `[start, end]`, oldest first
    pub fn list_transactions_in_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM transactions
            WHERE user_id = ? AND transaction_date >= ? AND transaction_date <= ?
            ORDER BY transaction_date, id
            "#,
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![user_id, format_datetime(&start), format_datetime(&end)],
                row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Transactions in one category dated within `[start, end]`
    pub fn list_transactions_by_category(
        &self,
        user_id: i64,
        category: Category,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM transactions
            WHERE user_id = ? AND category = ?
              AND transaction_date >= ? AND transaction_date <= ?
            ORDER BY transaction_date, id
            "#,
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![
                    user_id,
                    category.as_str(),
                    format_datetime(&start),
                    format_datetime(&end)
                ],
                row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ? AND user_id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id, user_id],
                row_to_transaction,
            )
            .optional()?;

        Ok(transaction)
    }

    /// Insert a transaction with an already-resolved category
    ///
    /// Fails with `Forbidden` when the account is not the user's.
    pub fn create_transaction(
        &self,
        user_id: i64,
        tx: &NewTransaction,
        categorization: CategorizationResult,
    ) -> Result<Transaction> {
        tx.validate()?;
        self.ensure_account_owned(user_id, tx.account_id)?;

        let id = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                INSERT INTO transactions (
                    user_id, account_id, amount, transaction_type, category, description,
                    transaction_date, is_recurring, recurring_id, categorized_automatically
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    user_id,
                    tx.account_id,
                    tx.amount,
                    tx.transaction_type.as_str(),
                    categorization.category.as_str(),
                    tx.description,
                    format_datetime(&tx.transaction_date),
                    tx.is_recurring,
                    tx.recurring_id,
                    categorization.automatic,
                ],
            )?;
            conn.last_insert_rowid()
        };

        tracing::debug!(
            id,
            category = categorization.category.as_str(),
            automatic = categorization.automatic,
            "Transaction created"
        );

        self.get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {} not found", id)))
    }

    /// Apply a partial update; `None` when the transaction does not exist
    ///
    /// Setting a category here marks it as user-chosen.
    pub fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        updates: &UpdateTransaction,
    ) -> Result<Option<Transaction>> {
        updates.validate()?;
        let Some(existing) = self.get_transaction(user_id, id)? else {
            return Ok(None);
        };

        let account_id = updates.account_id.unwrap_or(existing.account_id);
        if account_id != existing.account_id {
            self.ensure_account_owned(user_id, account_id)?;
        }

        let category = updates.category.unwrap_or(existing.category);
        let automatic = updates.category.is_none() && existing.categorized_automatically;
        let transaction_date = updates.transaction_date.unwrap_or(existing.transaction_date);

        {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE transactions
                SET account_id = ?, amount = ?, transaction_type = ?, category = ?,
                    description = ?, transaction_date = ?, is_recurring = ?, recurring_id = ?,
                    categorized_automatically = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![
                    account_id,
                    updates.amount.unwrap_or(existing.amount),
                    updates
                        .transaction_type
                        .unwrap_or(existing.transaction_type)
                        .as_str(),
                    category.as_str(),
                    updates.description.as_ref().or(existing.description.as_ref()),
                    format_datetime(&transaction_date),
                    updates.is_recurring.unwrap_or(existing.is_recurring),
                    updates.recurring_id.or(existing.recurring_id),
                    automatic,
                    id,
                    user_id,
                ],
            )?;
        }

        self.get_transaction(user_id, id)
    }

    /// Override a transaction's category; `None` when it does not exist
    pub fn update_transaction_category(
        &self,
        user_id: i64,
        id: i64,
        category: Category,
    ) -> Result<Option<Transaction>> {
        let updated = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE transactions
                SET category = ?, categorized_automatically = 0, updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![category.as_str(), id, user_id],
            )?
        };

        if updated == 0 {
            return Ok(None);
        }
        self.get_transaction(user_id, id)
    }

    /// Delete a transaction; `false` when it does not exist
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    pub(crate) fn ensure_account_owned(&self, user_id: i64, account_id: i64) -> Result<()> {
        if self.get_account(user_id, account_id)?.is_none() {
            return Err(Error::Forbidden(format!(
                "Account {} does not belong to the current user",
                account_id
            )));
        }
        Ok(())
    }
}
