// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use jiff::civil::Date;

use crate::{DateWindow, EventDefinition, EventInstance, EventRecord, expand};

/// The occurrences of a collection of events within one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    /// Instances in source order, each event's occurrences in date order.
    pub instances: Vec<EventInstance>,

    /// Records that could not be expanded.
    pub skipped: Vec<SkippedRecord>,
}

impl Materialized {
    /// Instances grouped by occurrence date.
    pub fn by_date(&self) -> BTreeMap<Date, Vec<&EventInstance>> {
        group_by_date(&self.instances)
    }
}

/// A stored record left out of materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// The record's id, if it had one.
    pub id: Option<String>,

    /// Why the record was skipped.
    pub reason: String,
}

/// Expands every event within `window`.
///
/// Results keep the order of `events`; the per-event occurrences are not
/// merged across events by date.
pub fn materialize(events: &[EventDefinition], window: &DateWindow) -> Materialized {
    let instances = events.iter().flat_map(|e| expand(e, window)).collect();
    Materialized {
        instances,
        skipped: Vec::new(),
    }
}

/// Like [`materialize`], over raw stored records.
///
/// A record that is not a valid event is skipped and reported in
/// [`Materialized::skipped`] without affecting the others.
pub fn materialize_records(records: &[EventRecord], window: &DateWindow) -> Materialized {
    let mut materialized = Materialized::default();
    for record in records {
        match EventDefinition::try_from(record) {
            Ok(event) => materialized.instances.extend(expand(&event, window)),
            Err(err) => {
                tracing::warn!(id = ?record.id, %err, "skipping malformed event");
                materialized.skipped.push(SkippedRecord {
                    id: record.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    materialized
}

/// Groups instances by occurrence date, keeping their relative order.
pub fn group_by_date<'a, I>(instances: I) -> BTreeMap<Date, Vec<&'a EventInstance>>
where
    I: IntoIterator<Item = &'a EventInstance>,
{
    let mut map: BTreeMap<Date, Vec<&EventInstance>> = BTreeMap::new();
    for instance in instances {
        map.entry(instance.date).or_default().push(instance);
    }
    map
}
