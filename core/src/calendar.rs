// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use uuid::Uuid;

use crate::localdb::{LocalDb, Stats};
use crate::{
    Config, EditScope, EditTarget, Error, Event, EventDraft, EventPatch, Expander, OccurrenceKey,
    SearchHit, Window, WriteSet, apply_delete, apply_edit, search, visible_events,
};

/// Goose calendar application core.
#[derive(Debug, Clone)]
pub struct Calendar {
    now: Zoned,
    db: LocalDb,
    expander: Expander,
}

/// A stored event, or an occurrence of a stored series.
#[derive(Debug)]
enum Resolved {
    Stored(Event),
    Occurrence { master: Event, start_ms: i64 },
}

impl Resolved {
    fn target(&self) -> EditTarget<'_> {
        match self {
            Resolved::Stored(event) => EditTarget::Stored(event),
            Resolved::Occurrence { master, start_ms } => EditTarget::Occurrence {
                master,
                start_ms: *start_ms,
            },
        }
    }
}

impl Calendar {
    /// Creates a new calendar with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Error> {
        config.normalize()?;
        let expander = config.expander()?;
        let now = Zoned::now().with_time_zone(expander.time_zone().clone());

        let db = LocalDb::open(config.db_path().as_deref()).await?;
        Ok(Self {
            now,
            db,
            expander,
        })
    }

    /// The current time in the calendar time zone.
    pub fn now(&self) -> &Zoned {
        &self.now
    }

    /// Create a default event draft starting at the next half hour.
    pub fn default_event_draft(&self) -> Result<EventDraft, Error> {
        EventDraft::default(&self.now)
    }

    /// Add a new event from the given draft.
    #[tracing::instrument(skip_all, fields(title = %draft.title))]
    pub async fn new_event(&self, draft: EventDraft) -> Result<Event, Error> {
        let event = draft.into_event(Uuid::new_v4().to_string())?;
        self.db.apply(&WriteSet::new().upsert(event.clone())).await?;
        tracing::info!(id = %event.id, "created event");
        Ok(event)
    }

    /// Get an event by a stored id or an occurrence id.
    #[tracing::instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> Result<Event, Error> {
        Ok(match self.resolve(id).await? {
            Resolved::Stored(event) => event,
            Resolved::Occurrence { master, start_ms } => master.occurrence_at(start_ms),
        })
    }

    /// Events and occurrences visible in the window, sorted by start.
    #[tracing::instrument(skip(self))]
    pub async fn list_window(&self, window: Window) -> Result<Vec<Event>, Error> {
        let events = self
            .db
            .events
            .list_in_range(window.start_ms, window.end_ms)
            .await?;
        Ok(visible_events(&events, window, &self.expander))
    }

    /// Edit an event, a whole series, or one occurrence of a series, returning the applied writes.
    #[tracing::instrument(skip(self, patch))]
    pub async fn edit(&self, id: &str, patch: &EventPatch, scope: EditScope) -> Result<WriteSet, Error> {
        let resolved = self.resolve(id).await?;
        let writes = apply_edit(resolved.target(), patch, scope)?;
        self.db.apply(&writes).await?;
        tracing::info!(writes = writes.len(), "edited event");
        Ok(writes)
    }

    /// Delete an event, a whole series, or one occurrence of a series, returning the applied writes.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str, scope: EditScope) -> Result<WriteSet, Error> {
        let resolved = self.resolve(id).await?;
        let writes = apply_delete(resolved.target(), scope)?;
        self.db.apply(&writes).await?;
        tracing::info!(writes = writes.len(), "deleted event");
        Ok(writes)
    }

    /// The next occurrence of the series behind `id` strictly after `after_ms`, or after now.
    #[tracing::instrument(skip(self))]
    pub async fn next_occurrence(&self, id: &str, after_ms: Option<i64>) -> Result<Option<i64>, Error> {
        let master = match self.resolve(id).await? {
            Resolved::Stored(event) => event,
            Resolved::Occurrence { master, .. } => master,
        };
        let after_ms = after_ms.unwrap_or_else(|| self.now.timestamp().as_millisecond());
        Ok(self.expander.find_next(&master, after_ms))
    }

    /// Search all events, showing each series as its next occurrence.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Error> {
        let events = self.db.events.list_all().await?;
        let now_ms = self.now.timestamp().as_millisecond();
        Ok(search(&events, query, now_ms, &self.expander))
    }

    pub async fn stats(&self) -> Result<Stats, Error> {
        self.db.stats().await
    }

    /// Close the calendar, saving any changes.
    pub async fn close(self) -> Result<(), Error> {
        self.db.close().await
    }

    async fn resolve(&self, id: &str) -> Result<Resolved, Error> {
        if let Some(event) = self.db.events.get(id).await? {
            return Ok(Resolved::Stored(event));
        }

        tracing::debug!(id, "no stored event, trying occurrence id");
        let Ok(key) = id.parse::<OccurrenceKey>() else {
            return Err(Error::NotFound(id.to_string()));
        };
        let master = match self.db.events.get(&key.series_id).await? {
            Some(master) if master.is_recurring() => master,
            _ => return Err(Error::NotFound(id.to_string())),
        };

        // Only instants the series actually generates can be targeted.
        if self
            .expander
            .generate(&master, key.start_ms, key.start_ms)
            .is_empty()
        {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(Resolved::Occurrence {
            master,
            start_ms: key.start_ms,
        })
    }
}
