// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod events;
mod reminders;

#[cfg(test)]
pub(crate) mod tests_utils;

use std::path::Path;

use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use crate::localdb::events::Events;
pub use crate::localdb::reminders::Reminders;
use crate::{Error, Write, WriteSet};

/// Row counts of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    pub events: i64,
    pub series: i64,
    pub reminders: i64,
}

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub events: Events,
    pub reminders: Reminders,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Error> {
        let (options, pool_options) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            if let Some(dir) = filename.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            let options = SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new())
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            // Every connection would get its own memory database, so keep exactly one alive.
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (SqliteConnectOptions::new().in_memory(true), pool_options)
        };

        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await?;

        tracing::debug!("ensuring tables in the database");
        let reminders = Reminders::new(pool.clone());
        let events = Events::new(pool.clone(), reminders.clone());
        Ok(LocalDb {
            pool,
            events,
            reminders,
        })
    }

    /// Applies the writes in order inside one transaction.
    ///
    /// Nothing is persisted if any write fails, including a delete of a missing event.
    pub async fn apply(&self, writes: &WriteSet) -> Result<(), Error> {
        let now_ms = Timestamp::now().as_millisecond();
        let mut tx = self.pool.begin().await?;

        for write in writes {
            match write {
                Write::Upsert(event) => {
                    tracing::debug!(id = %event.id, "upserting event");
                    Events::upsert(&mut tx, event, now_ms).await?;
                }
                Write::Delete { id } => {
                    tracing::debug!(%id, "deleting event");
                    if !Events::delete(&mut tx, id).await? {
                        return Err(Error::NotFound(id.clone()));
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<Stats, Error> {
        Ok(Stats {
            events: self.events.count().await?,
            series: self.events.count_series().await?,
            reminders: self.reminders.count().await?,
        })
    }

    pub async fn close(self) -> Result<(), Error> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}
