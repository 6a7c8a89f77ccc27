// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use evcal_core::{EventDefinition, EventInstance};
use jiff::civil::Date;

/// Asserts that the instances fall exactly on `expected`, in order.
///
/// # Panics
///
/// Panics if the occurrence dates differ.
pub fn assert_dates(instances: &[EventInstance], expected: &[Date]) {
    let dates: Vec<_> = instances.iter().map(|i| i.date).collect();
    assert_eq!(dates, expected, "occurrence dates mismatch");
}

/// Asserts that exactly one stored event carries `title` and returns it.
///
/// # Panics
///
/// Panics if there are zero or several such events.
pub fn assert_single_event<'a>(events: &'a [EventDefinition], title: &str) -> &'a EventDefinition {
    let found: Vec<_> = events.iter().filter(|e| e.title == title).collect();
    assert_eq!(found.len(), 1, "expected one event titled {title:?}");
    found[0]
}

/// Asserts that a file exists at the given path.
///
/// # Panics
///
/// Panics if the file does not exist.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File does not exist: {}", path.display());
}
