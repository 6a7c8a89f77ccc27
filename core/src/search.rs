// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use jiff::civil::Date;

use crate::EventInstance;

/// A normalized title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    /// Trims and lower-cases the text; whitespace-only text is an empty query.
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring match on the title. An empty title never matches.
    pub fn matches(&self, instance: &EventInstance) -> bool {
        !instance.title.is_empty() && instance.title.to_lowercase().contains(&self.needle)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Which days a month view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Every day of the month, no query active.
    FullMonth,

    /// Only days holding a match.
    SearchResults,
}

impl DisplayMode {
    pub fn for_query(query: &Query) -> Self {
        if query.is_empty() {
            DisplayMode::FullMonth
        } else {
            DisplayMode::SearchResults
        }
    }
}

/// Instances whose title matches `query`, in their original order.
///
/// An empty query returns the input unchanged.
pub fn filter(instances: &[EventInstance], query: &Query) -> Vec<EventInstance> {
    if query.is_empty() {
        return instances.to_vec();
    }

    instances
        .iter()
        .filter(|i| query.matches(i))
        .cloned()
        .collect()
}

/// Distinct occurrence dates of a filtered set.
///
/// Takes `query` because an unfiltered set must yield no dates: with no query
/// active the caller shows the full month instead of a list of matching days.
pub fn dates_with_matches(filtered: &[EventInstance], query: &Query) -> BTreeSet<Date> {
    if query.is_empty() {
        return BTreeSet::new();
    }

    filtered.iter().map(|i| i.date).collect()
}
