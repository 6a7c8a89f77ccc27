// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for reading and writing the event file.

use jiff::civil::{date, time};

use evcal_core::{Calendar, EventRecord, Recurrence};

use crate::common::{setup_temp_dirs, test_config, test_draft};

#[tokio::test]
async fn file_sync_missing_file_is_empty_calendar() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();

    assert!(calendar.events().is_empty());
    assert!(!temp_dirs.events_path().exists());
}

#[tokio::test]
async fn file_sync_reads_existing_file() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs
        .write_events(
            r#"[
  {"id": "1", "title": "Dentist", "date": "2024-01-09", "time": "15:00", "recurrence": "None"},
  {"id": "2", "title": "Gym", "date": "2024-01-01", "time": "07:00", "recurrence": "Weekly",
   "description": "leg day"}
]"#,
        )
        .await
        .unwrap();

    let calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();

    let events = calendar.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].time, time(15, 0, 0, 0));
    assert_eq!(events[1].recurrence, Recurrence::Weekly);
    assert_eq!(events[1].description.as_deref(), Some("leg day"));
}

#[tokio::test]
async fn file_sync_keeps_malformed_records() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs
        .write_events(
            r#"[
  {"id": "bad", "title": "No date", "time": "10:00", "recurrence": "None"},
  {"id": "odd", "title": "Fortnight", "date": "2024-01-03", "time": "10:00", "recurrence": "Fortnightly"}
]"#,
        )
        .await
        .unwrap();
    let config = test_config(&temp_dirs.events_path());

    // Act - add an event, which rewrites the file
    let mut calendar = Calendar::new(config.clone()).await.unwrap();
    assert_eq!(calendar.events().len(), 1);
    assert_eq!(calendar.events()[0].recurrence, Recurrence::None);
    calendar
        .add(test_draft(
            "New",
            date(2024, 1, 4),
            time(8, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap();

    // Assert - the malformed record survived the save
    let content = tokio::fs::read_to_string(temp_dirs.events_path())
        .await
        .unwrap();
    let records: Vec<EventRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.id.as_deref() == Some("bad")));

    let view = Calendar::new(config)
        .await
        .unwrap()
        .month_view(2024, 1, &Default::default())
        .unwrap();
    assert_eq!(view.skipped.len(), 1);
    assert_eq!(view.skipped[0].id.as_deref(), Some("bad"));
}

#[tokio::test]
async fn file_sync_writes_flat_records() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();
    let event = calendar
        .add(test_draft(
            "Payday",
            date(2024, 1, 31),
            time(0, 0, 0, 0),
            Recurrence::Monthly,
        ))
        .await
        .unwrap();

    let content = tokio::fs::read_to_string(temp_dirs.events_path())
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": event.id,
            "title": "Payday",
            "date": "2024-01-31",
            "time": "00:00",
            "recurrence": "Monthly",
        }])
    );
}

#[tokio::test]
async fn file_sync_invalid_json_fails_to_open() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs.write_events("{").await.unwrap();

    let result = Calendar::new(test_config(&temp_dirs.events_path())).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn file_sync_opens_despite_mistyped_records() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    temp_dirs
        .write_events(
            r#"[
  {"id": "1", "title": "Dentist", "date": "2024-01-09", "time": "15:00", "recurrence": "None"},
  {"id": 2, "title": "Gym", "date": "2024-01-10", "time": "07:00", "recurrence": "Daily"},
  null
]"#,
        )
        .await
        .unwrap();

    // Act - open, then add an event, which rewrites the file
    let mut calendar = Calendar::new(test_config(&temp_dirs.events_path()))
        .await
        .unwrap();
    let events = calendar.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Dentist");

    let view = calendar.month_view(2024, 1, &Default::default()).unwrap();
    assert_eq!(view.instances.len(), 1);
    assert_eq!(view.skipped.len(), 2);

    calendar
        .add(test_draft(
            "New",
            date(2024, 1, 4),
            time(8, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap();

    // Assert - the damaged values are written back as they were, in place
    let content = tokio::fs::read_to_string(temp_dirs.events_path())
        .await
        .unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0]["title"], "Dentist");
    assert_eq!(values[1]["id"], 2);
    assert!(values[2].is_null());
    assert_eq!(values[3]["title"], "New");
}
