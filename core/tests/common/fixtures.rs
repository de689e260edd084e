// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use goosecal_core::{Config, EventDraft, RecurrenceRule};
use jiff::Timestamp;

const HOUR_MS: i64 = 3_600_000;

/// Epoch milliseconds of an RFC 3339 instant, e.g. `2024-01-31T00:00:00Z`.
pub fn ms(s: &str) -> i64 {
    s.parse::<Timestamp>()
        .expect("valid RFC 3339 timestamp")
        .as_millisecond()
}

/// Creates a test configuration storing its database under `state_dir`, on UTC wall-clock time.
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        timezone: Some("UTC".to_string()),
        ..Default::default()
    }
}

/// Creates a one-hour plain event draft.
pub fn test_event_draft(title: &str, start: &str) -> EventDraft {
    let start_ms = ms(start);
    EventDraft {
        title: title.to_string(),
        description: None,
        start_ms,
        end_ms: start_ms + HOUR_MS,
        is_all_day: false,
        color: None,
        tags: Vec::new(),
        reminders: Vec::new(),
        recurrence_rule: None,
    }
}

/// Creates a one-hour series draft.
pub fn series_draft(title: &str, start: &str, rule: RecurrenceRule) -> EventDraft {
    EventDraft {
        recurrence_rule: Some(rule),
        ..test_event_draft(title, start)
    }
}
