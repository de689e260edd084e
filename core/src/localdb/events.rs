// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};

use crate::localdb::reminders::Reminders;
use crate::{Error, Event, RecurrenceRule, Reminder};

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
    reminders: Reminders,
}

impl Events {
    pub fn new(pool: SqlitePool, reminders: Reminders) -> Self {
        Self { pool, reminders }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Event>, Error> {
        const SQL: &str = "\
SELECT id, title, description, start_ms, end_ms, color, is_all_day,
       tags, recurrence_rule, exception_dates, series_id
FROM events
WHERE id = ?;
";

        let record: Option<EventRecord> = sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match record {
            Some(record) => {
                let reminders = self.reminders.list_for(id).await?;
                Ok(Some(record.into_event(reminders)?))
            }
            None => Ok(None),
        }
    }

    /// Every stored event.
    pub async fn list_all(&self) -> Result<Vec<Event>, Error> {
        const SQL: &str = "\
SELECT id, title, description, start_ms, end_ms, color, is_all_day,
       tags, recurrence_rule, exception_dates, series_id
FROM events
ORDER BY start_ms ASC, id ASC;
";

        let records: Vec<EventRecord> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;
        self.decode_all(records).await
    }

    /// Plain events overlapping `[start_ms, end_ms]` and every series master, whose
    /// occurrences may fall anywhere.
    pub async fn list_in_range(&self, start_ms: i64, end_ms: i64) -> Result<Vec<Event>, Error> {
        const SQL: &str = "\
SELECT id, title, description, start_ms, end_ms, color, is_all_day,
       tags, recurrence_rule, exception_dates, series_id
FROM events
WHERE recurrence_rule IS NOT NULL
   OR (start_ms <= ? AND end_ms >= ?)
ORDER BY start_ms ASC, id ASC;
";

        let records: Vec<EventRecord> = sqlx::query_as(SQL)
            .bind(end_ms)
            .bind(start_ms)
            .fetch_all(&self.pool)
            .await?;
        self.decode_all(records).await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        const SQL: &str = "SELECT COUNT(*) FROM events;";

        let row: (i64,) = sqlx::query_as(SQL).fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    pub async fn count_series(&self) -> Result<i64, sqlx::Error> {
        const SQL: &str = "SELECT COUNT(*) FROM events WHERE recurrence_rule IS NOT NULL;";

        let row: (i64,) = sqlx::query_as(SQL).fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    /// Rows that cannot be decoded are skipped so one corrupt row never hides the rest.
    async fn decode_all(&self, records: Vec<EventRecord>) -> Result<Vec<Event>, Error> {
        let mut reminders = self.reminders.list_all().await?;
        let events = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                let reminders = reminders.remove(&id).unwrap_or_default();
                match record.into_event(reminders) {
                    Ok(event) => Some(event),
                    Err(err) => {
                        tracing::warn!(%id, %err, "skipping undecodable event");
                        None
                    }
                }
            })
            .collect();
        Ok(events)
    }

    /// Inserts the event or replaces the stored one with the same id, reminders included.
    pub(super) async fn upsert(
        conn: &mut SqliteConnection,
        event: &Event,
        now_ms: i64,
    ) -> Result<(), Error> {
        const SQL: &str = "\
INSERT INTO events (id, title, description, start_ms, end_ms, color, is_all_day,
                    tags, recurrence_rule, exception_dates, series_id, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    title           = excluded.title,
    description     = excluded.description,
    start_ms        = excluded.start_ms,
    end_ms          = excluded.end_ms,
    color           = excluded.color,
    is_all_day      = excluded.is_all_day,
    tags            = excluded.tags,
    recurrence_rule = excluded.recurrence_rule,
    exception_dates = excluded.exception_dates,
    series_id       = excluded.series_id,
    updated_at      = excluded.updated_at;
";

        let record = EventRecord::from_event(event)?;
        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.start_ms)
            .bind(record.end_ms)
            .bind(&record.color)
            .bind(record.is_all_day)
            .bind(&record.tags)
            .bind(&record.recurrence_rule)
            .bind(&record.exception_dates)
            .bind(&record.series_id)
            .bind(now_ms)
            .bind(now_ms)
            .execute(&mut *conn)
            .await?;

        Reminders::replace(conn, &event.id, &event.reminders).await?;
        Ok(())
    }

    /// Deletes the event, returning whether it existed. Its reminders go with it.
    pub(super) async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool, Error> {
        const SQL: &str = "DELETE FROM events WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRecord {
    id: String,
    title: String,
    description: Option<String>,
    start_ms: i64,
    end_ms: i64,
    color: String,
    is_all_day: bool,
    tags: String,
    recurrence_rule: Option<String>,
    exception_dates: String,
    series_id: Option<String>,
}

impl EventRecord {
    fn from_event(event: &Event) -> Result<Self, Error> {
        Ok(Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_ms: event.start_ms,
            end_ms: event.end_ms,
            color: event.color.clone(),
            is_all_day: event.is_all_day,
            tags: serde_json::to_string(&event.tags)?,
            recurrence_rule: event
                .recurrence_rule
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            exception_dates: serde_json::to_string(&event.exception_dates)?,
            series_id: event.series_id.clone(),
        })
    }

    fn into_event(self, reminders: Vec<Reminder>) -> Result<Event, Error> {
        let tags: Vec<String> = serde_json::from_str(&self.tags)?;
        let recurrence_rule: Option<RecurrenceRule> = self
            .recurrence_rule
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let exception_dates: BTreeSet<i64> = serde_json::from_str(&self.exception_dates)?;

        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            is_all_day: self.is_all_day,
            color: self.color,
            tags,
            reminders,
            recurrence_rule,
            exception_dates,
            series_id: self.series_id,
        })
    }
}
