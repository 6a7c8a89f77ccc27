// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::ToSpan;
use jiff::civil::Date;

use crate::{Error, RangePosition, Result, datetime::format_date};

/// An inclusive date range `[start, end]`.
///
/// A window whose start is after its end is allowed and contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: Date,
    end: Date,
}

impl DateWindow {
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The whole calendar month, first to last day.
    pub fn month(year: i16, month: i8) -> Result<Self> {
        let first = Date::new(year, month, 1).map_err(|_| Error::InvalidDate {
            kind: "month",
            value: format!("{year:04}-{month:02}"),
            expected: "a valid year and month",
        })?;
        Ok(Self::month_of(first))
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: Date) -> Self {
        Self {
            start: date.first_of_month(),
            end: date.last_of_month(),
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether the window contains no dates at all.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn position(&self, date: Date) -> RangePosition {
        if self.is_empty() {
            RangePosition::InvalidRange
        } else if date < self.start {
            RangePosition::Before
        } else if date > self.end {
            RangePosition::After
        } else {
            RangePosition::InRange
        }
    }

    /// Every date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        self.start
            .series(1.day())
            .take_while(move |d| *d <= end)
    }

    /// The month before the one starting this window.
    pub fn prev_month(&self) -> Option<Self> {
        let first = self.start.first_of_month();
        first.checked_sub(1.month()).ok().map(Self::month_of)
    }

    /// The month after the one starting this window.
    pub fn next_month(&self) -> Option<Self> {
        let first = self.start.first_of_month();
        first.checked_add(1.month()).ok().map(Self::month_of)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}
