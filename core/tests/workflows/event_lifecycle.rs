// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end lifecycle tests for plain, non-recurring events.

use goosecal_core::{Calendar, EditScope, Error, EventPatch, Reminder, Window};

use crate::common::{ms, setup_temp_dirs, test_config, test_event_draft};

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let mut draft = test_event_draft("Team Meeting", "2024-03-01T09:00:00Z");
    draft.reminders = vec![Reminder::notification(10)];

    // Act
    let event = calendar.new_event(draft).await.unwrap();

    // Assert
    assert_eq!(event.title, "Team Meeting");
    assert_eq!(event.color, goosecal_core::DEFAULT_COLOR);
    assert!(temp_dirs.db_path().exists());

    let retrieved = calendar.get_event(&event.id).await.unwrap();
    assert_eq!(retrieved, event);

    let stats = calendar.stats().await.unwrap();
    assert_eq!(stats.events, 1);
    assert_eq!(stats.reminders, 1);
}

#[tokio::test]
async fn event_lifecycle_update_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let event = calendar
        .new_event(test_event_draft("Original Title", "2024-03-01T09:00:00Z"))
        .await
        .unwrap();

    // Act
    let patch = EventPatch {
        title: Some("Updated Title".to_string()),
        tags: Some(vec!["work".to_string()]),
        ..Default::default()
    };
    let writes = calendar
        .edit(&event.id, &patch, EditScope::One)
        .await
        .unwrap();

    // Assert
    assert_eq!(writes.len(), 1);
    let retrieved = calendar.get_event(&event.id).await.unwrap();
    assert_eq!(retrieved.title, "Updated Title");
    assert_eq!(retrieved.tags, vec!["work".to_string()]);
    assert_eq!(retrieved.start_ms, event.start_ms);
}

#[tokio::test]
async fn event_lifecycle_rejects_invalid_update() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let event = calendar
        .new_event(test_event_draft("Meeting", "2024-03-01T09:00:00Z"))
        .await
        .unwrap();

    // Act
    let patch = EventPatch {
        end_ms: Some(event.start_ms - 1),
        ..Default::default()
    };
    let res = calendar.edit(&event.id, &patch, EditScope::All).await;

    // Assert
    assert!(matches!(res, Err(Error::InvalidEvent(_))));
    let retrieved = calendar.get_event(&event.id).await.unwrap();
    assert_eq!(retrieved.end_ms, event.end_ms);
}

#[tokio::test]
async fn event_lifecycle_delete_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let event = calendar
        .new_event(test_event_draft("Dentist", "2024-03-01T09:00:00Z"))
        .await
        .unwrap();

    // Act
    calendar.delete(&event.id, EditScope::All).await.unwrap();

    // Assert
    let res = calendar.get_event(&event.id).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    assert!(matches!(
        calendar.delete(&event.id, EditScope::All).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn event_lifecycle_list_window_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    for (title, start) in [
        ("January", "2024-01-15T09:00:00Z"),
        ("March late", "2024-03-20T09:00:00Z"),
        ("March early", "2024-03-02T09:00:00Z"),
        ("April", "2024-04-01T09:00:00Z"),
    ] {
        calendar
            .new_event(test_event_draft(title, start))
            .await
            .unwrap();
    }

    // Act
    let window = Window::new(ms("2024-03-01T00:00:00Z"), ms("2024-03-31T23:59:59Z"));
    let events = calendar.list_window(window).await.unwrap();

    // Assert
    let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["March early", "March late"]);
}

#[tokio::test]
async fn event_lifecycle_search_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let mut draft = test_event_draft("Quarterly Review", "2024-03-01T09:00:00Z");
    draft.description = Some("Prepare numbers".to_string());
    calendar.new_event(draft).await.unwrap();
    calendar
        .new_event(test_event_draft("Lunch", "2024-03-02T12:00:00Z"))
        .await
        .unwrap();

    // Act & Assert
    let hits = calendar.search("NUMBERS").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].event.title, "Quarterly Review");

    let hits = calendar.search("2024-03-02").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].event.title, "Lunch");

    assert!(calendar.search("nothing").await.unwrap().is_empty());
}
