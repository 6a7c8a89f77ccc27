// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

/// Errors raised by the calendar core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A persisted record could not be turned into an event definition.
    #[error("invalid event record{}: {reason}", fmt_id(.id))]
    InvalidRecord {
        /// The id of the record, if it had one.
        id: Option<String>,
        /// What was wrong with the record.
        reason: String,
    },

    /// An event was submitted without a title.
    #[error("title is required")]
    EmptyTitle,

    /// An event with the same id already exists.
    #[error("event {0} already exists")]
    DuplicateId(String),

    /// No event matches the given id.
    #[error("event {0} not found")]
    NotFound(String),

    /// More than one event matches the given id prefix.
    #[error("id prefix {prefix} is ambiguous, matches: {}", .candidates.join(", "))]
    AmbiguousId {
        /// The prefix that was looked up.
        prefix: String,
        /// All ids starting with the prefix.
        candidates: Vec<String>,
    },

    /// Another event is scheduled at the same date and time.
    #[error("event conflict detected at the same date and time with: {}", .ids.join(", "))]
    Conflict {
        /// Ids of the conflicting events.
        ids: Vec<String>,
    },

    /// A single occurrence of a recurring event cannot be moved.
    #[error("cannot move recurring event {0} instances individually")]
    RecurringOccurrenceImmovable(String),

    /// A date or time value could not be parsed.
    #[error("invalid {kind} '{value}', expected {expected}")]
    InvalidDate {
        /// Which value was being parsed, e.g. `date`.
        kind: &'static str,
        /// The input text.
        value: String,
        /// A description of the accepted format.
        expected: &'static str,
    },

    /// The configuration is unusable.
    #[error("config error: {0}")]
    Config(String),

    /// Reading or writing the event file failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The event file is not valid JSON.
    #[error("failed to decode events: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type of the calendar core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

fn fmt_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" {id}"),
        None => String::new(),
    }
}
