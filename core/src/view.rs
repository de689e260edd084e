// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::{Error, Event, Expander};

/// An inclusive range of instants shown at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// From the start of `from` to the last millisecond of `to`, both in `tz`.
    pub fn days(from: Date, to: Date, tz: &TimeZone) -> Result<Self, Error> {
        let start = from.to_zoned(tz.clone())?;
        let end = to.checked_add(1.day())?.to_zoned(tz.clone())?;
        Ok(Self::new(
            start.timestamp().as_millisecond(),
            end.timestamp().as_millisecond() - 1,
        ))
    }

    /// The month containing `date`.
    pub fn month_of(date: Date, tz: &TimeZone) -> Result<Self, Error> {
        Self::days(date.first_of_month(), date.last_of_month(), tz)
    }

    /// The Monday-to-Sunday week containing `date`.
    pub fn week_of(date: Date, tz: &TimeZone) -> Result<Self, Error> {
        let offset = i64::from(date.weekday().to_monday_zero_offset());
        let monday = date.checked_sub(offset.days())?;
        let sunday = monday.checked_add(6.days())?;
        Self::days(monday, sunday, tz)
    }

    pub fn contains(&self, ms: i64) -> bool {
        self.start_ms <= ms && ms <= self.end_ms
    }
}

/// Everything to show in `window`: plain events overlapping it and the occurrences of every
/// series that start in it, sorted by start.
pub fn visible_events(events: &[Event], window: Window, expander: &Expander) -> Vec<Event> {
    let mut visible: Vec<Event> = events
        .iter()
        .flat_map(|event| {
            if event.is_recurring() {
                expander.generate(event, window.start_ms, window.end_ms)
            } else if event.overlaps(window.start_ms, window.end_ms) {
                vec![event.clone()]
            } else {
                Vec::new()
            }
        })
        .collect();

    visible.sort_by(|a, b| a.start_ms.cmp(&b.start_ms).then_with(|| a.id.cmp(&b.id)));
    visible
}
