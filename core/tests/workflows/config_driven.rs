// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.
//!
//! These tests validate how configuration affects the calendar,
//! including default values and the conflict policy.

use jiff::civil::{date, time};

use evcal_core::{Calendar, Config, ConflictPolicy, Error, Recurrence};

use crate::common::{TestConfigBuilder, setup_temp_dirs, test_draft};

#[tokio::test]
async fn config_default_time_applied() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_events_path(&temp_dirs.events_path())
        .with_default_time(time(8, 45, 0, 0))
        .build();
    let calendar = Calendar::new(config).await.unwrap();

    let draft = calendar.new_draft(date(2024, 6, 1));

    assert_eq!(draft.time, time(8, 45, 0, 0));
}

#[tokio::test]
async fn config_without_default_time_uses_noon() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_events_path(&temp_dirs.events_path())
        .build();
    let calendar = Calendar::new(config).await.unwrap();

    assert_eq!(calendar.new_draft(date(2024, 6, 1)).time, time(12, 0, 0, 0));
}

#[tokio::test]
async fn config_conflict_policy_reject() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_events_path(&temp_dirs.events_path())
        .build();
    let mut calendar = Calendar::new(config).await.unwrap();

    let slot = (date(2024, 1, 9), time(15, 0, 0, 0));
    calendar
        .add(test_draft("First", slot.0, slot.1, Recurrence::None))
        .await
        .unwrap();
    let err = calendar
        .add(test_draft("Second", slot.0, slot.1, Recurrence::None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict { .. }));
    assert_eq!(calendar.events().len(), 1);
}

#[tokio::test]
async fn config_conflict_policy_warn() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_events_path(&temp_dirs.events_path())
        .with_conflict_policy(ConflictPolicy::Warn)
        .build();
    let mut calendar = Calendar::new(config).await.unwrap();

    let slot = (date(2024, 1, 9), time(15, 0, 0, 0));
    for title in ["First", "Second"] {
        calendar
            .add(test_draft(title, slot.0, slot.1, Recurrence::None))
            .await
            .unwrap();
    }

    assert_eq!(calendar.events().len(), 2);
}

#[tokio::test]
async fn config_events_path_in_nested_directory() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join("deep").join("er").join("events.json");
    let config = TestConfigBuilder::new().with_events_path(&path).build();
    let mut calendar = Calendar::new(config).await.unwrap();

    calendar
        .add(test_draft(
            "Nested",
            date(2024, 1, 1),
            time(9, 0, 0, 0),
            Recurrence::None,
        ))
        .await
        .unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn config_from_toml() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let toml = format!(
        r#"
events_path = "{}"
default_time = "07:15"
conflict_policy = "warn"
"#,
        temp_dirs.events_path().display()
    );
    let config: Config = toml::from_str(&toml).unwrap();

    let calendar = Calendar::new(config).await.unwrap();

    assert_eq!(calendar.config().conflict_policy, ConflictPolicy::Warn);
    assert_eq!(calendar.new_draft(date(2024, 1, 1)).time, time(7, 15, 0, 0));
    assert_eq!(
        calendar.config().events_path.as_deref(),
        Some(temp_dirs.events_path().as_path())
    );
}
