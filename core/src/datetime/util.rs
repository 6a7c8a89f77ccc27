// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time, time};

use crate::{Error, Result};

/// NOTE: Used for storing in the event file, so it should be stable across different runs.
pub const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";
pub const STABLE_FORMAT_TIME: &str = "%H:%M";

/// The position of a date relative to a range defined by a start and an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The date is before the start of the range.
    Before,

    /// The date is within the range.
    InRange,

    /// The date is after the end of the range.
    After,

    /// The range is invalid, e.g., start date is after end date.
    InvalidRange,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<Date> {
    Date::strptime(STABLE_FORMAT_DATEONLY, s.trim()).map_err(|_| Error::InvalidDate {
        kind: "date",
        value: s.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Parse a `HH:MM` time of day.
pub fn parse_time(s: &str) -> Result<Time> {
    Time::strptime(STABLE_FORMAT_TIME, s.trim()).map_err(|_| Error::InvalidDate {
        kind: "time",
        value: s.to_string(),
        expected: "HH:MM",
    })
}

/// Parse a `YYYY-MM` month into its year and month numbers.
pub fn parse_month(s: &str) -> Result<(i16, i8)> {
    let err = || Error::InvalidDate {
        kind: "month",
        value: s.to_string(),
        expected: "YYYY-MM",
    };

    let (y, m) = s.trim().split_once('-').ok_or_else(err)?;
    let year: i16 = y.parse().map_err(|_| err())?;
    let month: i8 = m.parse().map_err(|_| err())?;
    Date::new(year, month, 1).map_err(|_| err())?;
    Ok((year, month))
}

pub fn format_date(d: Date) -> String {
    d.strftime(STABLE_FORMAT_DATEONLY).to_string()
}

pub fn format_time(t: Time) -> String {
    t.strftime(STABLE_FORMAT_TIME).to_string()
}

/// Events are scheduled at minute granularity.
pub fn truncate_to_minute(t: Time) -> Time {
    time(t.hour(), t.minute(), 0, 0)
}
