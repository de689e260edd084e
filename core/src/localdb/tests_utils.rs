// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::{Event, RecurrenceRule};

/// A plain event spanning `[start_ms, end_ms]`.
pub fn test_event(id: &str, title: &str, start_ms: i64, end_ms: i64) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        start_ms,
        end_ms,
        is_all_day: false,
        color: crate::event::DEFAULT_COLOR.to_string(),
        tags: Vec::new(),
        reminders: Vec::new(),
        recurrence_rule: None,
        exception_dates: BTreeSet::new(),
        series_id: None,
    }
}

/// A one-hour monthly series anchored at `start_ms`.
pub fn series_event(id: &str, title: &str, start_ms: i64) -> Event {
    Event {
        recurrence_rule: Some(RecurrenceRule::monthly(1)),
        ..test_event(id, title, start_ms, start_ms + 3_600_000)
    }
}
