// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use jiff::{ToSpan, Zoned};
use serde::{Deserialize, Serialize};

use crate::{Error, RecurrenceRule};

/// Color given to events created without one.
pub const DEFAULT_COLOR: &str = "#1890ff";

/// Kind given to reminders created without one.
pub const DEFAULT_REMINDER_KIND: &str = "notification";

/// A calendar event as stored, or an occurrence generated from a series master.
///
/// Times are epoch milliseconds. An event carrying a [`RecurrenceRule`] is a series master:
/// its `start_ms` anchors the first occurrence and `exception_dates` lists the occurrences
/// that must not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable unique identifier.
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start instant in epoch milliseconds.
    pub start_ms: i64,

    /// End instant in epoch milliseconds, never before `start_ms`.
    pub end_ms: i64,

    #[serde(default)]
    pub is_all_day: bool,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub reminders: Vec<Reminder>,

    /// Present only on series masters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,

    /// Suppressed occurrence instants of a series master.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exception_dates: BTreeSet<i64>,

    /// Back-reference to the series master this event was detached from, or that generated it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
}

impl Event {
    /// Whether this event is a series master.
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }

    /// Length of the event in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether the occurrence at `start_ms` is suppressed.
    pub fn is_excepted(&self, start_ms: i64) -> bool {
        self.exception_dates.contains(&start_ms)
    }

    /// Whether the event intersects the inclusive range `[start_ms, end_ms]`.
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms <= end_ms && self.end_ms >= start_ms
    }

    /// Materializes the occurrence of this series starting at `start_ms`.
    ///
    /// The occurrence copies every descriptive field, keeps the duration, drops the rule and
    /// the exceptions, and points back at this event through `series_id`.
    pub fn occurrence_at(&self, start_ms: i64) -> Event {
        Event {
            id: OccurrenceKey::new(self.id.as_str(), start_ms).to_string(),
            start_ms,
            end_ms: start_ms.saturating_add(self.duration_ms()),
            recurrence_rule: None,
            exception_dates: BTreeSet::new(),
            series_id: Some(self.id.clone()),
            ..self.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidEvent("title must not be empty".to_string()));
        }
        if self.end_ms < self.start_ms {
            return Err(Error::InvalidEvent(format!(
                "end ({}) is before start ({})",
                self.end_ms, self.start_ms
            )));
        }
        if let Some(rule) = &self.recurrence_rule {
            if self.series_id.is_some() {
                return Err(Error::InvalidEvent(
                    "an event detached from a series cannot repeat".to_string(),
                ));
            }
            rule.validate()?;
        }
        Ok(())
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A reminder fired some minutes before an event starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the start of the event.
    pub minutes: i64,

    #[serde(default = "default_reminder_kind", rename = "type")]
    pub kind: String,
}

impl Reminder {
    pub fn notification(minutes: i64) -> Self {
        Self {
            minutes,
            kind: default_reminder_kind(),
        }
    }
}

fn default_reminder_kind() -> String {
    DEFAULT_REMINDER_KIND.to_string()
}

/// Darft for an event, used for creating new events.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_ms: i64,
    pub end_ms: i64,
    pub is_all_day: bool,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub reminders: Vec<Reminder>,

    /// Makes the new event a series master.
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl EventDraft {
    /// A one-hour draft starting at the next 00 or 30 minute after `now`.
    pub fn default(now: &Zoned) -> Result<Self, Error> {
        let start = if now.minute() < 30 {
            now.with().minute(30).second(0).subsec_nanosecond(0).build()?
        } else {
            now.with()
                .minute(0)
                .second(0)
                .subsec_nanosecond(0)
                .build()?
                .checked_add(1.hour())?
        };
        let end = start.checked_add(1.hour())?;

        Ok(Self {
            title: String::new(),
            description: None,
            start_ms: start.timestamp().as_millisecond(),
            end_ms: end.timestamp().as_millisecond(),
            is_all_day: false,
            color: None,
            tags: Vec::new(),
            reminders: Vec::new(),
            recurrence_rule: None,
        })
    }

    /// Validates the draft and turns it into a stored event with the given id.
    pub fn into_event(self, id: String) -> Result<Event, Error> {
        let event = Event {
            id,
            title: self.title,
            description: self.description,
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            is_all_day: self.is_all_day,
            color: self.color.unwrap_or_else(default_color),
            tags: self.tags,
            reminders: self.reminders,
            recurrence_rule: self.recurrence_rule,
            exception_dates: BTreeSet::new(),
            series_id: None,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct EventPatch {
    pub title: Option<String>,

    /// `Some(None)` removes the description.
    pub description: Option<Option<String>>,

    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub is_all_day: Option<bool>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
    pub reminders: Option<Vec<Reminder>>,

    /// `Some(None)` turns a series master into a plain event.
    pub recurrence_rule: Option<Option<RecurrenceRule>>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_ms.is_none()
            && self.end_ms.is_none()
            && self.is_all_day.is_none()
            && self.color.is_none()
            && self.tags.is_none()
            && self.reminders.is_none()
            && self.recurrence_rule.is_none()
    }

    /// Applies the patch to an event, modifying it in place.
    ///
    /// The exception list is never touched.
    pub fn apply_to<'a>(&self, e: &'a mut Event) -> &'a mut Event {
        if let Some(title) = &self.title {
            e.title = title.clone();
        }
        if let Some(description) = &self.description {
            e.description = description.clone();
        }
        if let Some(start_ms) = self.start_ms {
            e.start_ms = start_ms;
        }
        if let Some(end_ms) = self.end_ms {
            e.end_ms = end_ms;
        }
        if let Some(is_all_day) = self.is_all_day {
            e.is_all_day = is_all_day;
        }
        if let Some(color) = &self.color {
            e.color = color.clone();
        }
        if let Some(tags) = &self.tags {
            e.tags = tags.clone();
        }
        if let Some(reminders) = &self.reminders {
            e.reminders = reminders.clone();
        }
        if let Some(rule) = &self.recurrence_rule {
            e.recurrence_rule = rule.clone();
        }
        e
    }
}

/// Identity of a generated occurrence: the master id and the occurrence start.
///
/// Rendered as `{series_id}_{start_ms}`, which is also the `id` of the generated event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    pub series_id: String,
    pub start_ms: i64,
}

impl OccurrenceKey {
    pub fn new(series_id: impl Into<String>, start_ms: i64) -> Self {
        Self {
            series_id: series_id.into(),
            start_ms,
        }
    }
}

impl Display for OccurrenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.series_id, self.start_ms)
    }
}

impl FromStr for OccurrenceKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (series_id, start_ms) = s
            .rsplit_once('_')
            .ok_or_else(|| Error::InvalidId(s.to_string()))?;
        if series_id.is_empty() {
            return Err(Error::InvalidId(s.to_string()));
        }
        let start_ms = start_ms
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;
        Ok(Self::new(series_id, start_ms))
    }
}
