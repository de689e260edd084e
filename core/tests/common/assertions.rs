// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use goosecal_core::Event;

/// Asserts that `event` is the generated occurrence of `master` starting at `start_ms`.
pub fn assert_occurrence_of(event: &Event, master: &Event, start_ms: i64) {
    assert_eq!(event.id, format!("{}_{start_ms}", master.id), "Occurrence id mismatch");
    assert_eq!(event.start_ms, start_ms, "Occurrence start mismatch");
    assert_eq!(
        event.duration_ms(),
        master.duration_ms(),
        "Occurrence duration mismatch"
    );
    assert_eq!(event.series_id.as_deref(), Some(master.id.as_str()));
    assert!(event.recurrence_rule.is_none(), "Occurrence must not carry a rule");
}

/// Asserts that `event` is a stored event detached from the series `master_id`.
pub fn assert_detached_from(event: &Event, master_id: &str) {
    assert_ne!(event.id, master_id, "Detached event must have its own id");
    assert!(!event.id.contains('_'), "Detached event must have a stored id");
    assert_eq!(event.series_id.as_deref(), Some(master_id));
    assert!(event.recurrence_rule.is_none(), "Detached event must not carry a rule");
    assert!(event.exception_dates.is_empty());
}
