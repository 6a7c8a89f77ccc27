// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification, rescheduling and deletion, checking that every step is
//! written to the event file.

use jiff::civil::{date, time};

use evcal_core::{Calendar, Error, EventPatch, JsonFileRepository, Recurrence};

use crate::common::{
    assert_file_exists, assert_single_event, setup_temp_dirs, test_config, test_draft,
};

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();
    let draft = test_draft(
        "Team Meeting",
        date(2024, 1, 15),
        time(10, 0, 0, 0),
        Recurrence::None,
    );

    // Act
    let event = calendar.add(draft).await.unwrap();

    // Assert - verify event created
    assert_eq!(event.title, "Team Meeting");
    assert_eq!(event.date, date(2024, 1, 15));
    assert_file_exists(&temp_dirs.events_path());

    // Assert - verify retrieval by id and prefix
    assert_eq!(calendar.get(&event.id).unwrap().id, event.id);
    assert_eq!(calendar.get(&event.id[..6]).unwrap().id, event.id);
}

#[tokio::test]
async fn event_lifecycle_create_update_delete() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.events_path());
    let mut calendar = Calendar::new(config.clone()).await.unwrap();
    let event = calendar
        .add(test_draft(
            "Dentist",
            date(2024, 1, 9),
            time(15, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap();

    // Act - update
    let patch = EventPatch {
        title: Some("Dentist checkup".to_string()),
        time: Some(time(16, 30, 0, 0)),
        ..Default::default()
    };
    calendar.update(&event.id, &patch).await.unwrap();

    // Assert - reload sees the update
    let reloaded = Calendar::new(config.clone()).await.unwrap();
    let updated = assert_single_event(reloaded.events(), "Dentist checkup");
    assert_eq!(updated.id, event.id);
    assert_eq!(updated.time, time(16, 30, 0, 0));

    // Act - reschedule, then delete
    calendar.reschedule(&event.id, date(2024, 1, 12)).await.unwrap();
    let reloaded = Calendar::new(config.clone()).await.unwrap();
    assert_eq!(reloaded.events()[0].date, date(2024, 1, 12));

    calendar.delete(&event.id).await.unwrap();

    // Assert - nothing left on disk
    let reloaded = Calendar::new(config).await.unwrap();
    assert!(reloaded.events().is_empty());
}

#[tokio::test]
async fn event_lifecycle_rejects_invalid_changes() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();
    let standup = calendar
        .add(test_draft(
            "Standup",
            date(2024, 1, 1),
            time(9, 0, 0, 0),
            Recurrence::Weekly,
        ))
        .await
        .unwrap();

    // Empty title
    let err = calendar
        .add(test_draft("", date(2024, 1, 2), time(9, 0, 0, 0), Recurrence::None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyTitle));

    // Same anchor slot as the standup
    let err = calendar
        .add(test_draft(
            "Clash",
            date(2024, 1, 1),
            time(9, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { ids } if ids == vec![standup.id.clone()]));

    // A later occurrence of the standup is not a conflict
    calendar
        .add(test_draft(
            "Review",
            date(2024, 1, 8),
            time(9, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap();

    // Recurring events cannot be rescheduled
    let err = calendar
        .reschedule(&standup.id, date(2024, 1, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RecurringOccurrenceImmovable(_)));

    // Only the two valid events were written
    let stored = JsonFileRepository::new(temp_dirs.events_path());
    let reloaded = Calendar::with_repository(test_config(&temp_dirs.events_path()), stored)
        .await
        .unwrap();
    assert_eq!(reloaded.events().len(), 2);
}

#[tokio::test]
async fn event_lifecycle_unknown_id() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();

    let err = calendar.delete("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(id) if id == "missing"));

    let err = calendar
        .update("missing", &EventPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
