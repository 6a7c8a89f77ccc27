// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::iter::FusedIterator;

use jiff::Span;
use jiff::civil::Date;

use crate::{DateWindow, EventDefinition, EventInstance, RangePosition, Recurrence};

/// Expands one event into its occurrences inside `window`.
///
/// The `n`-th occurrence is always computed from the anchor date, so monthly
/// events keep their day-of-month: an event anchored on the 31st lands on the
/// last day of shorter months and returns to the 31st afterwards.
pub fn expand<'a>(event: &'a EventDefinition, window: &DateWindow) -> Occurrences<'a> {
    let next = match window.position(event.date) {
        RangePosition::After | RangePosition::InvalidRange => None,
        RangePosition::Before | RangePosition::InRange => {
            Some(first_index(event.date, event.recurrence, window.start()))
        }
    };

    Occurrences {
        event,
        window: *window,
        next,
    }
}

/// Lazy sequence of the occurrences of one event within a window.
///
/// Cloning yields an independent iterator from the same position.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    event: &'a EventDefinition,
    window: DateWindow,

    /// Step index of the next candidate, `None` once exhausted.
    next: Option<i64>,
}

impl Iterator for Occurrences<'_> {
    type Item = EventInstance;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let n = self.next?;
            let Some(date) = nth_date(self.event.date, self.event.recurrence, n) else {
                tracing::debug!(id = %self.event.id, n, "occurrence out of calendar range");
                self.next = None;
                return None;
            };

            self.next = self.event.is_recurring().then_some(n + 1);
            match self.window.position(date) {
                RangePosition::InRange => return Some(self.event.instance_at(date)),
                RangePosition::Before => {}
                RangePosition::After | RangePosition::InvalidRange => {
                    self.next = None;
                    return None;
                }
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

/// The smallest step index whose date may be on or after `start`.
///
/// Never overshoots; the iterator skips any remaining dates before `start`.
fn first_index(anchor: Date, recurrence: Recurrence, start: Date) -> i64 {
    if anchor >= start {
        return 0;
    }

    let days = || {
        anchor
            .until(start)
            .map(|span| i64::from(span.get_days()))
            .unwrap_or(0)
    };
    match recurrence {
        Recurrence::None => 0,
        Recurrence::Daily => days(),
        Recurrence::Weekly => days().div_euclid(7),
        Recurrence::Monthly => {
            let months = (i64::from(start.year()) - i64::from(anchor.year())) * 12
                + (i64::from(start.month()) - i64::from(anchor.month()));
            months.max(0)
        }
    }
}

fn nth_date(anchor: Date, recurrence: Recurrence, n: i64) -> Option<Date> {
    let span = match recurrence {
        Recurrence::None if n == 0 => return Some(anchor),
        Recurrence::None => return None,
        Recurrence::Daily => Span::new().try_days(n),
        Recurrence::Weekly => Span::new().try_weeks(n),
        Recurrence::Monthly => Span::new().try_months(n),
    };
    anchor.checked_add(span.ok()?).ok()
}
