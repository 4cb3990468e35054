//! User operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::User;

const USER_COLUMNS: &str = "id, email, name, created_at, last_seen_at";

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let created_at: String = row.get(3)?;
    let last_seen_at: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(3, &created_at)?,
        last_seen_at: parse_datetime(4, &last_seen_at)?,
    })
}

impl Database {
    /// Create the user on first sight, otherwise bump `last_seen_at`
    pub fn upsert_user(&self, email: &str) -> Result<User> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO users (email) VALUES (?)
            ON CONFLICT(email) DO UPDATE SET last_seen_at = CURRENT_TIMESTAMP
            "#,
            params![email],
        )?;

        let user = conn.query_row(
            &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
            params![email],
            row_to_user,
        )?;

        Ok(user)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }
}
