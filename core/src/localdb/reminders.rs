// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::Reminder;

#[derive(Debug, Clone)]
pub struct Reminders {
    pool: SqlitePool,
}

impl Reminders {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reminders of one event, in insertion order.
    pub async fn list_for(&self, event_id: &str) -> Result<Vec<Reminder>, sqlx::Error> {
        const SQL: &str = "\
SELECT event_id, minutes, kind
FROM reminders
WHERE event_id = ?
ORDER BY id ASC;
";

        let records: Vec<ReminderRecord> = sqlx::query_as(SQL)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Reminder::from).collect())
    }

    /// All reminders grouped by event id.
    pub async fn list_all(&self) -> Result<HashMap<String, Vec<Reminder>>, sqlx::Error> {
        const SQL: &str = "\
SELECT event_id, minutes, kind
FROM reminders
ORDER BY id ASC;
";

        let records: Vec<ReminderRecord> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;

        let mut grouped: HashMap<String, Vec<Reminder>> = HashMap::new();
        for record in records {
            grouped
                .entry(record.event_id.clone())
                .or_default()
                .push(record.into());
        }
        Ok(grouped)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        const SQL: &str = "SELECT COUNT(*) FROM reminders;";

        let row: (i64,) = sqlx::query_as(SQL).fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    /// Replaces the reminders of an event.
    pub(super) async fn replace(
        conn: &mut SqliteConnection,
        event_id: &str,
        reminders: &[Reminder],
    ) -> Result<(), sqlx::Error> {
        const SQL_DELETE: &str = "DELETE FROM reminders WHERE event_id = ?;";
        const SQL_INSERT: &str = "\
INSERT INTO reminders (event_id, minutes, kind)
VALUES (?, ?, ?);
";

        sqlx::query(SQL_DELETE)
            .bind(event_id)
            .execute(&mut *conn)
            .await?;

        for reminder in reminders {
            sqlx::query(SQL_INSERT)
                .bind(event_id)
                .bind(reminder.minutes)
                .bind(&reminder.kind)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReminderRecord {
    event_id: String,
    minutes: i64,
    kind: String,
}

impl From<ReminderRecord> for Reminder {
    fn from(record: ReminderRecord) -> Self {
        Reminder {
            minutes: record.minutes,
            kind: record.kind,
        }
    }
}
