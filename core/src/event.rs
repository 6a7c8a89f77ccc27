// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::civil::{Date, Time};

use crate::datetime::{format_date, format_time, parse_date, parse_time, truncate_to_minute};
use crate::{Error, Result};

/// How often an event repeats after its anchor date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Recurrence {
    /// The event happens once, on its anchor date.
    #[default]
    None,

    /// Every day.
    Daily,

    /// Every seven days.
    Weekly,

    /// Every calendar month, on the anchor day-of-month when it exists.
    Monthly,
}

const RECURRENCE_NONE: &str = "None";
const RECURRENCE_DAILY: &str = "Daily";
const RECURRENCE_WEEKLY: &str = "Weekly";
const RECURRENCE_MONTHLY: &str = "Monthly";

impl Recurrence {
    /// Whether the event has more than one occurrence.
    pub fn is_recurring(self) -> bool {
        self != Recurrence::None
    }

    /// Reads a stored recurrence literal, falling back to [`Recurrence::None`]
    /// for anything unrecognized.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => Recurrence::None,
            Some(s) => s.parse().unwrap_or_else(|()| {
                tracing::warn!(value = s, "unrecognized recurrence, treating as none");
                Recurrence::None
            }),
        }
    }
}

impl AsRef<str> for Recurrence {
    fn as_ref(&self) -> &str {
        match self {
            Recurrence::None => RECURRENCE_NONE,
            Recurrence::Daily => RECURRENCE_DAILY,
            Recurrence::Weekly => RECURRENCE_WEEKLY,
            Recurrence::Monthly => RECURRENCE_MONTHLY,
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Recurrence {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            RECURRENCE_NONE => Ok(Recurrence::None),
            RECURRENCE_DAILY => Ok(Recurrence::Daily),
            RECURRENCE_WEEKLY => Ok(Recurrence::Weekly),
            RECURRENCE_MONTHLY => Ok(Recurrence::Monthly),
            _ => Err(()),
        }
    }
}

/// A stored event and its recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    /// Opaque unique identifier, immutable after creation.
    pub id: String,

    /// Display text, required to be non-empty when the event is saved.
    pub title: String,

    /// The anchor date, which is also the first occurrence.
    pub date: Date,

    /// Time of day, at minute granularity.
    pub time: Time,

    /// Free text description, if any.
    pub description: Option<String>,

    /// The recurrence rule.
    pub recurrence: Recurrence,
}

impl EventDefinition {
    /// Creates a non-recurring event without description.
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: Date, time: Time) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            time: truncate_to_minute(time),
            description: None,
            recurrence: Recurrence::None,
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Checks the fields that only the mutation boundary enforces.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        Ok(())
    }

    /// The occurrence of this event on `date`.
    pub(crate) fn instance_at(&self, date: Date) -> EventInstance {
        EventInstance {
            id: self.id.clone(),
            title: self.title.clone(),
            date,
            anchor: self.date,
            time: self.time,
            description: self.description.clone(),
            recurrence: self.recurrence,
        }
    }
}

/// One concrete occurrence of an [`EventDefinition`].
///
/// Identified by `(id, date)`; several instances may share an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInstance {
    pub id: String,
    pub title: String,

    /// The occurrence date.
    pub date: Date,

    /// The anchor date of the definition this occurrence comes from.
    pub anchor: Date,

    pub time: Time,
    pub description: Option<String>,
    pub recurrence: Recurrence,
}

impl EventInstance {
    /// Whether this is the first occurrence of its definition.
    pub fn is_anchor(&self) -> bool {
        self.date == self.anchor
    }
}

/// The flat key-value shape an event is persisted as.
///
/// Every field is optional so that a damaged file can still be read; see
/// [`EventDefinition::try_from`] for what is required. A stored value that
/// does not even have this shape is kept in [`malformed`](Self::malformed).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: Option<String>,
    pub title: Option<String>,

    /// `YYYY-MM-DD`
    pub date: Option<String>,

    /// `HH:MM`
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// One of `None`, `Daily`, `Weekly` or `Monthly`.
    pub recurrence: Option<String>,

    #[serde(skip)]
    pub malformed: Option<MalformedRecord>,
}

/// A stored value that could not be decoded as an [`EventRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// The value exactly as it was read.
    pub value: serde_json::Value,
    pub reason: String,
}

impl EventRecord {
    /// Decodes one stored value. A value of the wrong shape never fails; it
    /// becomes a record that holds it in [`malformed`](Self::malformed).
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(record) => record,
            Err(err) => Self {
                id: value.get("id").and_then(|id| id.as_str()).map(str::to_string),
                malformed: Some(MalformedRecord {
                    value,
                    reason: format!("malformed record: {err}"),
                }),
                ..Default::default()
            },
        }
    }

    /// The value to store, which is the original one for a malformed record.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        match &self.malformed {
            Some(malformed) => Ok(malformed.value.clone()),
            None => Ok(serde_json::to_value(self)?),
        }
    }
}

impl From<&EventDefinition> for EventRecord {
    fn from(event: &EventDefinition) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: Some(event.title.clone()),
            date: Some(format_date(event.date)),
            time: Some(format_time(event.time)),
            description: event.description.clone(),
            recurrence: Some(event.recurrence.to_string()),
            malformed: None,
        }
    }
}

impl TryFrom<&EventRecord> for EventDefinition {
    type Error = Error;

    fn try_from(record: &EventRecord) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRecord {
            id: record.id.clone(),
            reason,
        };

        if let Some(malformed) = &record.malformed {
            return Err(invalid(malformed.reason.clone()));
        }

        let id = match record.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(invalid("missing id".to_string())),
        };

        let date = match record.date.as_deref() {
            Some(d) if !d.trim().is_empty() => parse_date(d).map_err(|e| invalid(e.to_string()))?,
            _ => return Err(invalid("missing date".to_string())),
        };

        let time = match record.time.as_deref() {
            Some(t) if !t.trim().is_empty() => parse_time(t).map_err(|e| invalid(e.to_string()))?,
            _ => return Err(invalid("missing time".to_string())),
        };

        Ok(Self {
            id,
            title: record.title.clone().unwrap_or_default(),
            date,
            time,
            description: record.description.clone().filter(|d| !d.is_empty()),
            recurrence: Recurrence::from_stored(record.recurrence.as_deref()),
        })
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Date,
    pub time: Time,
    pub description: Option<String>,
    pub recurrence: Recurrence,
}

impl EventDraft {
    /// A blank draft on `date` at `time`.
    pub fn new(date: Date, time: Time) -> Self {
        Self {
            title: String::new(),
            date,
            time,
            description: None,
            recurrence: Recurrence::None,
        }
    }

    /// Turns the draft into a definition carrying the given id.
    pub fn into_definition(self, id: impl Into<String>) -> EventDefinition {
        EventDefinition {
            id: id.into(),
            title: self.title,
            date: self.date,
            time: truncate_to_minute(self.time),
            description: self.description.filter(|d| !d.is_empty()),
            recurrence: self.recurrence,
        }
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<Date>,
    pub time: Option<Time>,

    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,

    pub recurrence: Option<Recurrence>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.description.is_none()
            && self.recurrence.is_none()
    }

    /// Applies the patch to a copy of `event`.
    pub fn apply_to(&self, event: &EventDefinition) -> EventDefinition {
        let mut e = event.clone();
        if let Some(title) = &self.title {
            e.title = title.clone();
        }
        if let Some(date) = self.date {
            e.date = date;
        }
        if let Some(time) = self.time {
            e.time = truncate_to_minute(time);
        }
        if let Some(description) = &self.description {
            e.description = description.clone().filter(|d| !d.is_empty());
        }
        if let Some(recurrence) = self.recurrence {
            e.recurrence = recurrence;
        }
        e
    }
}
