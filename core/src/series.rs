// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Resolving edits and deletes against a series or one of its occurrences.

use std::fmt::Display;
use std::str::FromStr;

use uuid::Uuid;

use crate::{Error, Event, EventPatch};

/// How far a change on a recurring event reaches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EditScope {
    /// Only the targeted occurrence.
    One,

    /// The whole series.
    #[default]
    All,
}

const SCOPE_ONE: &str = "one";
const SCOPE_ALL: &str = "all";

impl AsRef<str> for EditScope {
    fn as_ref(&self) -> &str {
        match self {
            EditScope::One => SCOPE_ONE,
            EditScope::All => SCOPE_ALL,
        }
    }
}

impl Display for EditScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EditScope {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            SCOPE_ONE => Ok(EditScope::One),
            SCOPE_ALL => Ok(EditScope::All),
            _ => Err(()),
        }
    }
}

/// What a change is aimed at.
#[derive(Debug, Clone, Copy)]
pub enum EditTarget<'a> {
    /// A stored event: a plain event, a detached event, or a series master.
    Stored(&'a Event),

    /// A generated occurrence, identified by its master and its start instant.
    Occurrence { master: &'a Event, start_ms: i64 },
}

impl<'a> EditTarget<'a> {
    /// The stored event the target lives in.
    pub fn stored(&self) -> &'a Event {
        match self {
            EditTarget::Stored(event) => event,
            EditTarget::Occurrence { master, .. } => master,
        }
    }
}

/// One record change to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    /// Insert the event, or replace the stored event with the same id.
    Upsert(Event),

    /// Remove the stored event with this id.
    Delete { id: String },
}

/// Ordered record changes produced by one edit or delete.
///
/// The writes must be applied in order, and all of them or none.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSet {
    writes: Vec<Write>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(mut self, event: Event) -> Self {
        self.writes.push(Write::Upsert(event));
        self
    }

    pub fn delete(mut self, id: impl Into<String>) -> Self {
        self.writes.push(Write::Delete { id: id.into() });
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Write> {
        self.writes.iter()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Events inserted or replaced by this set, in order.
    pub fn upserted(&self) -> impl Iterator<Item = &Event> {
        self.writes.iter().filter_map(|w| match w {
            Write::Upsert(event) => Some(event),
            Write::Delete { .. } => None,
        })
    }
}

impl IntoIterator for WriteSet {
    type Item = Write;
    type IntoIter = std::vec::IntoIter<Write>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

impl<'a> IntoIterator for &'a WriteSet {
    type Item = &'a Write;
    type IntoIter = std::slice::Iter<'a, Write>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.iter()
    }
}

/// Computes the writes for editing `target` with `patch`.
///
/// With [`EditScope::One`] on an occurrence, the master gains an exception at the occurrence
/// instant and a detached copy of the occurrence carries the changes. Otherwise the patch goes
/// to the stored event, leaving its exceptions alone.
pub fn apply_edit(target: EditTarget<'_>, patch: &EventPatch, scope: EditScope) -> Result<WriteSet, Error> {
    match occurrence_scope(target, scope)? {
        Some((master, start_ms)) => {
            let mut detached = master.occurrence_at(start_ms);
            patch.apply_to(&mut detached);
            detached.id = Uuid::new_v4().to_string();
            detached.recurrence_rule = None;
            detached.exception_dates.clear();
            detached.series_id = Some(master.id.clone());
            detached.validate()?;

            tracing::debug!(master = %master.id, start_ms, detached = %detached.id, "detaching occurrence");
            Ok(WriteSet::new()
                .upsert(with_exception(master, start_ms))
                .upsert(detached))
        }
        None => {
            let mut event = target.stored().clone();
            patch.apply_to(&mut event);
            if event.is_recurring() && event.series_id.take().is_some() {
                tracing::debug!(id = %event.id, "detached event becomes a series of its own");
            }
            event.validate()?;
            Ok(WriteSet::new().upsert(event))
        }
    }
}

/// Computes the writes for deleting `target`.
///
/// Deleting a whole series removes only the master; events detached from it stay.
pub fn apply_delete(target: EditTarget<'_>, scope: EditScope) -> Result<WriteSet, Error> {
    match occurrence_scope(target, scope)? {
        Some((master, start_ms)) => Ok(WriteSet::new().upsert(with_exception(master, start_ms))),
        None => Ok(WriteSet::new().delete(target.stored().id.as_str())),
    }
}

/// The master and instant a scope-one change applies to, or `None` for a whole-event change.
fn occurrence_scope(target: EditTarget<'_>, scope: EditScope) -> Result<Option<(&Event, i64)>, Error> {
    if scope == EditScope::All {
        return Ok(None);
    }
    match target {
        EditTarget::Occurrence { master, start_ms } if master.is_recurring() => {
            Ok(Some((master, start_ms)))
        }
        EditTarget::Stored(event) if event.is_recurring() => {
            Err(Error::MissingOccurrence(event.id.clone()))
        }
        // A single event is its own only occurrence.
        _ => Ok(None),
    }
}

fn with_exception(master: &Event, start_ms: i64) -> Event {
    let mut master = master.clone();
    master.exception_dates.insert(start_ms);
    master
}
