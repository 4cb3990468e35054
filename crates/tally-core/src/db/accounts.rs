//! Account operations

use rusqlite::{params, OptionalExtension};

use super::{parse_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Account, AccountType, NewAccount, UpdateAccount};

const ACCOUNT_COLUMNS: &str =
    "id, user_id, name, account_type, balance, currency, description, created_at, updated_at";

fn row_to_account(row: &rusqlite::Row) -> rusqlite::Result<Account> {
    let account_type: String = row.get(3)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        account_type: parse_column::<AccountType>(3, &account_type)?,
        balance: row.get(4)?,
        currency: row.get(5)?,
        description: row.get(6)?,
        created_at: parse_datetime(7, &created_at)?,
        updated_at: parse_datetime(8, &updated_at)?,
    })
}

impl Database {
    /// List a user's accounts
    pub fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM accounts WHERE user_id = ? ORDER BY name",
            ACCOUNT_COLUMNS
        ))?;

        let accounts = stmt
            .query_map(params![user_id], row_to_account)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Get an account by ID
    pub fn get_account(&self, user_id: i64, id: i64) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let account = conn
            .query_row(
                &format!(
                    "SELECT {} FROM accounts WHERE id = ? AND user_id = ?",
                    ACCOUNT_COLUMNS
                ),
                params![id, user_id],
                row_to_account,
            )
            .optional()?;

        Ok(account)
    }

    /// Create an account
    pub fn create_account(&self, user_id: i64, account: &NewAccount) -> Result<Account> {
        account.validate()?;
        let id = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                INSERT INTO accounts (user_id, name, account_type, balance, currency, description)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
                params![
                    user_id,
                    account.name,
                    account.account_type.as_str(),
                    account.balance,
                    account.currency,
                    account.description,
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.require_account(user_id, id)
    }

    /// Apply a partial update; `None` when the account does not exist
    pub fn update_account(
        &self,
        user_id: i64,
        id: i64,
        updates: &UpdateAccount,
    ) -> Result<Option<Account>> {
        updates.validate()?;
        let Some(existing) = self.get_account(user_id, id)? else {
            return Ok(None);
        };

        let name = updates.name.as_ref().unwrap_or(&existing.name);
        let account_type = updates.account_type.unwrap_or(existing.account_type);
        let balance = updates.balance.unwrap_or(existing.balance);
        let currency = updates.currency.as_ref().unwrap_or(&existing.currency);
        let description = updates.description.as_ref().or(existing.description.as_ref());

        {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE accounts
                SET name = ?, account_type = ?, balance = ?, currency = ?, description = ?,
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ? AND user_id = ?
                "#,
                params![
                    name,
                    account_type.as_str(),
                    balance,
                    currency,
                    description,
                    id,
                    user_id
                ],
            )?;
        }

        self.get_account(user_id, id)
    }

    /// Delete an account and its transactions; `false` when it does not exist
    pub fn delete_account(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM accounts WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    fn require_account(&self, user_id: i64, id: i64) -> Result<Account> {
        self.get_account(user_id, id)?
            .ok_or_else(|| crate::error::Error::NotFound(format!("Account {} not found", id)))
    }
}
