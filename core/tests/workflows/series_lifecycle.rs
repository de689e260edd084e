// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end lifecycle tests for recurring series and their occurrences.

use goosecal_core::{Calendar, EditScope, Error, Event, EventPatch, RecurrenceRule, Window, Write};

use crate::common::{
    assert_detached_from, assert_occurrence_of, ms, series_draft, setup_temp_dirs, test_config,
};

fn jan_to_apr() -> Window {
    Window::new(ms("2024-01-01T00:00:00Z"), ms("2024-04-30T23:59:59Z"))
}

async fn setup_rent(calendar: &Calendar) -> Event {
    calendar
        .new_event(series_draft(
            "Rent",
            "2024-01-31T00:00:00Z",
            RecurrenceRule::monthly(1),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn series_lifecycle_list_expands_occurrences() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;

    // Act
    let events = calendar.list_window(jan_to_apr()).await.unwrap();

    // Assert
    let expected = [
        ms("2024-01-31T00:00:00Z"),
        ms("2024-02-29T00:00:00Z"),
        ms("2024-03-31T00:00:00Z"),
        ms("2024-04-30T00:00:00Z"),
    ];
    assert_eq!(events.len(), expected.len());
    for (event, start_ms) in events.iter().zip(expected) {
        assert_occurrence_of(event, &master, start_ms);
    }
}

#[tokio::test]
async fn series_lifecycle_get_occurrence_by_id() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;
    let feb = ms("2024-02-29T00:00:00Z");

    // Act
    let occurrence = calendar
        .get_event(&format!("{}_{feb}", master.id))
        .await
        .unwrap();

    // Assert
    assert_occurrence_of(&occurrence, &master, feb);

    // Feb 28 is not an occurrence of a series anchored on the 31st.
    let feb_28 = ms("2024-02-28T00:00:00Z");
    let res = calendar.get_event(&format!("{}_{feb_28}", master.id)).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn series_lifecycle_edit_one_detaches_occurrence() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;
    let feb = ms("2024-02-29T00:00:00Z");
    let patch = EventPatch {
        title: Some("Rescheduled".to_string()),
        ..Default::default()
    };

    // Act
    let writes = calendar
        .edit(&format!("{}_{feb}", master.id), &patch, EditScope::One)
        .await
        .unwrap();

    // Assert - master gained one exception
    let stored = calendar.get_event(&master.id).await.unwrap();
    assert_eq!(stored.exception_dates.iter().copied().collect::<Vec<_>>(), vec![feb]);
    assert_eq!(stored.title, "Rent");

    // Assert - detached event persisted
    let detached_id = match writes.iter().last() {
        Some(Write::Upsert(event)) => event.id.clone(),
        other => panic!("expected detached upsert, got {other:?}"),
    };
    let detached = calendar.get_event(&detached_id).await.unwrap();
    assert_detached_from(&detached, &master.id);
    assert_eq!(detached.title, "Rescheduled");
    assert_eq!(detached.start_ms, feb);

    // Assert - the view shows the detached event in place of the occurrence
    let events = calendar.list_window(jan_to_apr()).await.unwrap();
    let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Rent", "Rescheduled", "Rent", "Rent"]);
    assert_eq!(events[1].id, detached_id);

    // Assert - the replaced occurrence can no longer be targeted
    let res = calendar
        .edit(&format!("{}_{feb}", master.id), &patch, EditScope::One)
        .await;
    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn series_lifecycle_edit_all_keeps_exceptions() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;
    let mar = ms("2024-03-31T00:00:00Z");
    calendar
        .delete(&format!("{}_{mar}", master.id), EditScope::One)
        .await
        .unwrap();

    // Act
    let patch = EventPatch {
        title: Some("Mortgage".to_string()),
        ..Default::default()
    };
    calendar
        .edit(&format!("{}_{}", master.id, master.start_ms), &patch, EditScope::All)
        .await
        .unwrap();

    // Assert
    let events = calendar.list_window(jan_to_apr()).await.unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.title == "Mortgage"));
    assert!(events.iter().all(|e| e.start_ms != mar));
}

#[tokio::test]
async fn series_lifecycle_scope_one_on_master_needs_occurrence() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;

    // Act
    let res = calendar.delete(&master.id, EditScope::One).await;

    // Assert
    assert!(matches!(res, Err(Error::MissingOccurrence(_))));
    assert_eq!(calendar.stats().await.unwrap().series, 1);
}

#[tokio::test]
async fn series_lifecycle_delete_one_and_next_occurrence() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;
    let feb_15 = ms("2024-02-15T00:00:00Z");
    let feb = ms("2024-02-29T00:00:00Z");

    assert_eq!(
        calendar
            .next_occurrence(&master.id, Some(feb_15))
            .await
            .unwrap(),
        Some(feb)
    );

    // Act
    let writes = calendar
        .delete(&format!("{}_{feb}", master.id), EditScope::One)
        .await
        .unwrap();

    // Assert
    assert_eq!(writes.len(), 1);
    assert_eq!(
        calendar
            .next_occurrence(&master.id, Some(feb_15))
            .await
            .unwrap(),
        Some(ms("2024-03-31T00:00:00Z"))
    );
    let events = calendar.list_window(jan_to_apr()).await.unwrap();
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn series_lifecycle_delete_all_orphans_detached() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();
    let master = setup_rent(&calendar).await;
    let feb = ms("2024-02-29T00:00:00Z");
    let patch = EventPatch {
        title: Some("Rescheduled".to_string()),
        ..Default::default()
    };
    calendar
        .edit(&format!("{}_{feb}", master.id), &patch, EditScope::One)
        .await
        .unwrap();

    // Act
    let apr = ms("2024-04-30T00:00:00Z");
    calendar
        .delete(&format!("{}_{apr}", master.id), EditScope::All)
        .await
        .unwrap();

    // Assert
    assert!(matches!(
        calendar.get_event(&master.id).await,
        Err(Error::NotFound(_))
    ));
    let events = calendar.list_window(jan_to_apr()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Rescheduled");
    assert_eq!(events[0].series_id.as_deref(), Some(master.id.as_str()));

    let stats = calendar.stats().await.unwrap();
    assert_eq!(stats.events, 1);
    assert_eq!(stats.series, 0);
}

#[tokio::test]
async fn series_lifecycle_rejects_zero_interval() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.state_dir))
        .await
        .unwrap();

    // Act
    let res = calendar
        .new_event(series_draft(
            "Broken",
            "2024-01-01T00:00:00Z",
            RecurrenceRule::custom(0),
        ))
        .await;

    // Assert
    assert!(matches!(res, Err(Error::InvalidRule(_))));
    assert_eq!(calendar.stats().await.unwrap().events, 0);
}
