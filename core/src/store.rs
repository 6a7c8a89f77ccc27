// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::civil::Date;

use crate::datetime::truncate_to_minute;
use crate::{
    ConflictCandidate, DateWindow, Error, EventDefinition, EventRecord, Materialized, Result,
    SkippedRecord, conflicting_ids, materialize,
};

/// What to do when a saved event lands on an occupied date and time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Refuse the change with [`Error::Conflict`].
    #[default]
    Reject,

    /// Log a warning and save anyway.
    Warn,
}

/// The single owned collection of event definitions.
///
/// All mutations go through [`add`](Self::add), [`update`](Self::update),
/// [`delete`](Self::delete) and [`reschedule`](Self::reschedule), which
/// validate titles, keep ids unique and apply the [`ConflictPolicy`].
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<EventDefinition>,
    rejected: Vec<Rejected>,
    policy: ConflictPolicy,
    revision: u64,
}

/// A loaded record that is not a usable event, kept so it survives a save.
#[derive(Debug, Clone)]
struct Rejected {
    /// Position in the loaded collection.
    index: usize,
    record: EventRecord,
    reason: String,
}

impl EventStore {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Builds a store from persisted records.
    ///
    /// Records that fail to convert, or repeat an id seen earlier, are set
    /// aside and reported by [`skipped`](Self::skipped).
    pub fn from_records(records: Vec<EventRecord>, policy: ConflictPolicy) -> Self {
        let mut store = Self::new(policy);
        let mut seen = HashSet::new();
        for (index, record) in records.into_iter().enumerate() {
            let result = EventDefinition::try_from(&record).and_then(|e| {
                if seen.insert(e.id.clone()) {
                    Ok(e)
                } else {
                    Err(Error::InvalidRecord {
                        id: Some(e.id),
                        reason: "duplicate id".to_string(),
                    })
                }
            });

            match result {
                Ok(event) => store.events.push(event),
                Err(err) => {
                    tracing::warn!(id = ?record.id, %err, "ignoring stored event");
                    store.rejected.push(Rejected {
                        index,
                        record,
                        reason: err.to_string(),
                    });
                }
            }
        }
        tracing::debug!(
            events = store.events.len(),
            rejected = store.rejected.len(),
            "loaded events"
        );
        store
    }

    /// The full collection in persisted form.
    ///
    /// Rejected records go back to the position they were loaded from, as far
    /// as the events around them still exist.
    pub fn to_records(&self) -> Vec<EventRecord> {
        let mut records = Vec::with_capacity(self.events.len() + self.rejected.len());
        let mut events = self.events.iter().map(EventRecord::from);
        for rejected in &self.rejected {
            while records.len() < rejected.index {
                match events.next() {
                    Some(record) => records.push(record),
                    None => break,
                }
            }
            records.push(rejected.record.clone());
        }
        records.extend(events);
        records
    }

    /// Event definitions in insertion order.
    pub fn events(&self) -> &[EventDefinition] {
        &self.events
    }

    /// Loaded records that are not usable events, as they were read.
    pub fn rejected(&self) -> impl Iterator<Item = &EventRecord> {
        self.rejected.iter().map(|r| &r.record)
    }

    /// Like [`rejected`](Self::rejected), with the reason for each.
    pub fn skipped(&self) -> Vec<SkippedRecord> {
        self.rejected
            .iter()
            .map(|r| SkippedRecord {
                id: r.record.id.clone(),
                reason: r.reason.clone(),
            })
            .collect()
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ConflictPolicy) {
        self.policy = policy;
    }

    /// Bumped by every successful mutation; usable as a memoization key.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Looks up an event by its full id or by a unique id prefix.
    pub fn resolve(&self, id: &str) -> Result<&EventDefinition> {
        if let Some(event) = self.get(id) {
            return Ok(event);
        }

        let mut candidates = self.events.iter().filter(|e| e.id.starts_with(id));
        match (candidates.next(), candidates.next()) {
            (Some(event), None) if !id.is_empty() => Ok(event),
            (Some(a), Some(b)) if !id.is_empty() => {
                let mut ids = vec![a.id.clone(), b.id.clone()];
                ids.extend(candidates.map(|e| e.id.clone()));
                Err(Error::AmbiguousId {
                    prefix: id.to_string(),
                    candidates: ids,
                })
            }
            _ => Err(Error::NotFound(id.to_string())),
        }
    }

    /// Appends a new event; its id must not be in use.
    #[tracing::instrument(skip_all, fields(id = %event.id))]
    pub fn add(&mut self, mut event: EventDefinition) -> Result<()> {
        event.validate()?;
        if self.get(&event.id).is_some() {
            return Err(Error::DuplicateId(event.id));
        }

        event.time = truncate_to_minute(event.time);
        self.check_conflict(&event)?;
        self.events.push(event);
        self.revision += 1;
        Ok(())
    }

    /// Replaces the event with the same id. Returns `false` if there is none.
    #[tracing::instrument(skip_all, fields(id = %event.id))]
    pub fn update(&mut self, mut event: EventDefinition) -> Result<bool> {
        let Some(index) = self.position(&event.id) else {
            tracing::debug!("no such event, nothing to update");
            return Ok(false);
        };

        event.validate()?;
        event.time = truncate_to_minute(event.time);
        self.check_conflict(&event)?;
        self.events[index] = event;
        self.revision += 1;
        Ok(true)
    }

    /// Removes the event with `id`. Returns `false` if there is none.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.events.remove(index);
                self.revision += 1;
                true
            }
            None => {
                tracing::debug!(id, "no such event, nothing to delete");
                false
            }
        }
    }

    /// Moves a non-recurring event to `date`, keeping its time.
    ///
    /// Occurrences of a recurring event cannot be moved one by one.
    #[tracing::instrument(skip(self))]
    pub fn reschedule(&mut self, id: &str, date: Date) -> Result<bool> {
        let Some(event) = self.get(id) else {
            return Ok(false);
        };

        if event.is_recurring() {
            return Err(Error::RecurringOccurrenceImmovable(id.to_string()));
        }

        let moved = EventDefinition {
            date,
            ..event.clone()
        };
        self.update(moved)
    }

    /// Occurrences of every stored event within `window`.
    pub fn materialize(&self, window: &DateWindow) -> Materialized {
        let mut materialized = materialize(&self.events, window);
        materialized.skipped = self.skipped();
        materialized
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    fn check_conflict(&self, event: &EventDefinition) -> Result<()> {
        let candidate = ConflictCandidate::from(event);
        let ids = conflicting_ids(&candidate, &self.events);
        if ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = ids.into_iter().map(str::to_string).collect();
        match self.policy {
            ConflictPolicy::Reject => Err(Error::Conflict { ids }),
            ConflictPolicy::Warn => {
                tracing::warn!(?ids, "another event is scheduled at this time");
                Ok(())
            }
        }
    }
}
