// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};

use crate::EventDefinition;

/// The slot an event is about to occupy, checked before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCandidate {
    /// Id of the event being created or edited; it never conflicts with itself.
    pub id: String,
    pub date: Option<Date>,
    pub time: Option<Time>,
}

impl ConflictCandidate {
    pub fn new(id: impl Into<String>, date: Date, time: Time) -> Self {
        Self {
            id: id.into(),
            date: Some(date),
            time: Some(time),
        }
    }
}

impl From<&EventDefinition> for ConflictCandidate {
    fn from(event: &EventDefinition) -> Self {
        Self::new(event.id.clone(), event.date, event.time)
    }
}

/// Whether another event is stored at the same date and time as `candidate`.
///
/// Only anchor dates are compared: a later occurrence of a recurring event
/// does not count. A candidate without date or time never conflicts.
pub fn has_conflict(candidate: &ConflictCandidate, events: &[EventDefinition]) -> bool {
    conflicts(candidate, events).next().is_some()
}

/// Ids of every event that [`has_conflict`] would report.
pub fn conflicting_ids<'a>(
    candidate: &ConflictCandidate,
    events: &'a [EventDefinition],
) -> Vec<&'a str> {
    conflicts(candidate, events).map(|e| e.id.as_str()).collect()
}

fn conflicts<'a>(
    candidate: &ConflictCandidate,
    events: &'a [EventDefinition],
) -> impl Iterator<Item = &'a EventDefinition> {
    let slot = candidate.date.zip(candidate.time);
    let id = candidate.id.clone();
    events.iter().filter(move |e| match slot {
        Some((date, time)) => e.id != id && e.date == date && e.time == time,
        None => false,
    })
}
