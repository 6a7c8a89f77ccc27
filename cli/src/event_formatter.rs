// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use evcal_core::{EventDefinition, EventInstance, Recurrence, format_date, format_time};
use jiff::civil::{Date, Time};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

/// Length of the id prefix shown in compact tables.
const SHORT_ID_LEN: usize = 8;

/// What an event table row needs, shared by stored events and occurrences.
pub trait EventRow {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn date(&self) -> Date;
    fn time(&self) -> Time;
    fn description(&self) -> Option<&str>;
    fn recurrence(&self) -> Recurrence;
}

impl EventRow for EventDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> Date {
        self.date
    }

    fn time(&self) -> Time {
        self.time
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn recurrence(&self) -> Recurrence {
        self.recurrence
    }
}

impl EventRow for EventInstance {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> Date {
        self.date
    }

    fn time(&self) -> Time {
        self.time
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn recurrence(&self) -> Recurrence {
        self.recurrence
    }
}

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    /// The default columns, with the full id and description when verbose.
    pub fn with_verbose(verbose: bool) -> Self {
        let columns = if verbose {
            vec![
                EventColumn::Id { short: false },
                EventColumn::Date,
                EventColumn::Time,
                EventColumn::Recurrence,
                EventColumn::Title,
                EventColumn::Description,
            ]
        } else {
            vec![
                EventColumn::Id { short: true },
                EventColumn::Date,
                EventColumn::Time,
                EventColumn::Title,
            ]
        };
        Self::new(columns)
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, E: EventRow>(&'a self, events: &'a [E]) -> Display<'a, E> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, E: EventRow> {
    events: &'a [E],
    formatter: &'a EventFormatter,
}

impl<E: EventRow> fmt::Display for Display<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.events)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Id { short: bool },
    Title,
    Date,
    Time,
    Recurrence,
    Description,
}

impl<E: EventRow> TableColumn<E> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id { .. } => "id",
            EventColumn::Title => "title",
            EventColumn::Date => "date",
            EventColumn::Time => "time",
            EventColumn::Recurrence => "recurrence",
            EventColumn::Description => "description",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a E) -> Cow<'a, str> {
        match self {
            EventColumn::Id { short: true } => short_id(data.id()).into(),
            EventColumn::Id { short: false } => data.id().into(),
            EventColumn::Title => data.title().into(),
            EventColumn::Date => format_date(data.date()).into(),
            EventColumn::Time => format_time(data.time()).into(),
            EventColumn::Recurrence => data.recurrence().to_string().into(),
            EventColumn::Description => data.description().unwrap_or_default().into(),
        }
    }

    fn get_color(&self, data: &E) -> Option<Color> {
        match self {
            EventColumn::Id { .. } => Some(Color::BrightBlack),
            EventColumn::Title if data.recurrence().is_recurring() => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// The first characters of an id, on a char boundary.
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}
