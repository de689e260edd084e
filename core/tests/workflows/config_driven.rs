// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.
//!
//! These tests validate how configuration affects calendar behavior,
//! including persistence location, time zone and yearly stepping policies.

use goosecal_core::{Calendar, Config, Error, RecurrenceRule, Window, YearlyStep};

use crate::common::{ms, series_draft, setup_temp_dirs, test_config, test_event_draft};

#[tokio::test]
async fn config_state_dir_persists_across_sessions() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let event = calendar
        .new_event(test_event_draft("Persisted", "2024-05-01T10:00:00Z"))
        .await
        .unwrap();
    calendar.close().await.unwrap();

    // Act
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();

    // Assert
    let retrieved = calendar.get_event(&event.id).await.unwrap();
    assert_eq!(retrieved, event);
}

#[tokio::test]
async fn config_unknown_time_zone_fails() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        timezone: Some("Nowhere/Atlantis".to_string()),
        ..test_config(&temp_dirs.state_dir)
    };

    // Act
    let res = Calendar::new(config).await;

    // Assert
    assert!(matches!(res, Err(Error::Config(_))));
}

#[tokio::test]
async fn config_default_yearly_policies() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let series = calendar
        .new_event(series_draft(
            "New Year",
            "2024-01-01T08:00:00Z",
            RecurrenceRule::yearly(1),
        ))
        .await
        .unwrap();
    let after = Some(ms("2024-06-01T00:00:00Z"));

    // Act
    let window = Window::new(ms("2024-06-01T00:00:00Z"), ms("2025-06-01T00:00:00Z"));
    let listed = calendar.list_window(window).await.unwrap();
    let next = calendar.next_occurrence(&series.id, after).await.unwrap();

    // Assert - the view steps calendar years while lookup steps 365 days
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].start_ms, ms("2025-01-01T08:00:00Z"));
    assert_eq!(next, Some(ms("2024-12-31T08:00:00Z")));
}

#[tokio::test]
async fn config_yearly_lookup_can_follow_calendar() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        yearly_lookup: YearlyStep::Calendar,
        ..test_config(&temp_dirs.state_dir)
    };
    let calendar = Calendar::new(config).await.unwrap();
    let series = calendar
        .new_event(series_draft(
            "New Year",
            "2024-01-01T08:00:00Z",
            RecurrenceRule::yearly(1),
        ))
        .await
        .unwrap();

    // Act
    let next = calendar
        .next_occurrence(&series.id, Some(ms("2024-06-01T00:00:00Z")))
        .await
        .unwrap();

    // Assert
    assert_eq!(next, Some(ms("2025-01-01T08:00:00Z")));
}
