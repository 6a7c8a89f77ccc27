// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create test data including
//! configurations, drafts, and raw stored records.

use std::path::{Path, PathBuf};

use evcal_core::{Config, ConfigTime, ConflictPolicy, EventDraft, EventRecord, Recurrence};
use jiff::civil::{Date, Time};

/// Creates a test configuration storing events at `events_path`.
#[must_use]
pub fn test_config(events_path: &Path) -> Config {
    Config {
        events_path: Some(events_path.to_path_buf()),
        default_time: None,
        conflict_policy: ConflictPolicy::Reject,
    }
}

/// Builder for test configurations with a fluent API.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .with_events_path(&path)
///     .with_conflict_policy(ConflictPolicy::Warn)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct TestConfigBuilder {
    events_path: Option<PathBuf>,
    default_time: Option<Time>,
    conflict_policy: ConflictPolicy,
}

impl TestConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_events_path(mut self, path: &Path) -> Self {
        self.events_path = Some(path.to_path_buf());
        self
    }

    #[must_use]
    pub fn with_default_time(mut self, time: Time) -> Self {
        self.default_time = Some(time);
        self
    }

    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        Config {
            events_path: self.events_path,
            default_time: self.default_time.map(ConfigTime),
            conflict_policy: self.conflict_policy,
        }
    }
}

/// Creates a titled draft on `date` at `time`.
#[must_use]
pub fn test_draft(title: &str, date: Date, time: Time, recurrence: Recurrence) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        recurrence,
        ..EventDraft::new(date, time)
    }
}

/// Creates a raw stored record from string fields.
#[must_use]
pub fn test_record(id: &str, title: &str, date: Option<&str>, recurrence: &str) -> EventRecord {
    EventRecord {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        date: date.map(str::to_string),
        time: Some("09:00".to_string()),
        description: None,
        recurrence: Some(recurrence.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = TestConfigBuilder::new().build();
        assert!(config.events_path.is_none());
        assert_eq!(config.conflict_policy, ConflictPolicy::Reject);
    }

    #[test]
    fn test_config_builder_sets_fields() {
        let config = TestConfigBuilder::new()
            .with_events_path(Path::new("/tmp/events.json"))
            .with_default_time(time(8, 0, 0, 0))
            .with_conflict_policy(ConflictPolicy::Warn)
            .build();
        assert_eq!(config.default_time(), time(8, 0, 0, 0));
        assert_eq!(config.conflict_policy, ConflictPolicy::Warn);
    }

    #[test]
    fn test_draft_sets_title() {
        let draft = test_draft("Gym", date(2024, 1, 1), time(7, 0, 0, 0), Recurrence::Daily);
        assert_eq!(draft.title, "Gym");
        assert_eq!(draft.recurrence, Recurrence::Daily);
    }
}
