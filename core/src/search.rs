// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use jiff::civil::Date;

use crate::{Event, Expander};

/// An event matching a search, as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The matching event, or for a series its next occurrence.
    pub event: Event,

    /// Local date the displayed event starts on.
    pub date: Date,
}

/// Finds events whose title, description, tags or `YYYY-MM-DD` start date contain `query`,
/// ignoring case.
///
/// A series is shown as its next occurrence after `now_ms` and is left out once it has none.
pub fn search(events: &[Event], query: &str, now_ms: i64, expander: &Expander) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = events
        .iter()
        .filter_map(|event| {
            let shown = if event.is_recurring() {
                let next = expander.find_next(event, now_ms)?;
                event.occurrence_at(next)
            } else {
                event.clone()
            };
            let date = Timestamp::from_millisecond(shown.start_ms)
                .ok()?
                .to_zoned(expander.time_zone().clone())
                .date();

            (text_matches(&shown, &query) || date.to_string().contains(&query))
                .then_some(SearchHit { event: shown, date })
        })
        .collect();

    hits.sort_by_key(|hit| hit.event.start_ms);
    hits
}

fn text_matches(event: &Event, query: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(query);
    contains(&event.title)
        || event.description.as_deref().is_some_and(contains)
        || event.tags.iter().any(|tag| contains(tag.as_str()))
}
