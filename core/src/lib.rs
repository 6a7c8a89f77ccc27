// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar core: recurrence expansion, materialization of occurrences,
//! conflict detection and title search over a flat list of events.

mod calendar;
mod config;
mod conflict;
mod datetime;
mod error;
mod event;
mod materialize;
mod recurrence;
mod repository;
mod search;
mod store;

pub use crate::calendar::{Calendar, MonthView};
pub use crate::config::{APP_NAME, Config, ConfigTime, DEFAULT_EVENT_TIME, expand_path};
pub use crate::conflict::{ConflictCandidate, conflicting_ids, has_conflict};
pub use crate::datetime::{
    DateWindow, RangePosition, format_date, format_time, parse_date, parse_month, parse_time,
};
pub use crate::error::{Error, Result};
pub use crate::event::{
    EventDefinition, EventDraft, EventInstance, EventPatch, EventRecord, MalformedRecord,
    Recurrence,
};
pub use crate::materialize::{
    Materialized, SkippedRecord, group_by_date, materialize, materialize_records,
};
pub use crate::recurrence::{Occurrences, expand};
pub use crate::repository::{EventRepository, JsonFileRepository, MemoryRepository};
pub use crate::search::{DisplayMode, Query, dates_with_matches, filter};
pub use crate::store::{ConflictPolicy, EventStore};
