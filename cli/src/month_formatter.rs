// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use colored::Colorize;
use evcal_core::{DisplayMode, EventInstance, MonthView, SkippedRecord, format_date, format_time};
use jiff::civil::Date;

use crate::event_formatter::EventFormatter;
use crate::util::OutputFormat;

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

/// Renders a [`MonthView`] as a grid plus event list, or as JSON.
#[derive(Debug)]
pub struct MonthFormatter {
    today: Option<Date>,
    verbose: bool,
    format: OutputFormat,
}

impl MonthFormatter {
    pub fn new(today: Option<Date>) -> Self {
        Self {
            today,
            verbose: false,
            format: OutputFormat::Table,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, view: &'a MonthView) -> Display<'a> {
        Display {
            view,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    view: &'a MonthView,
    formatter: &'a MonthFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => self.fmt_json(f),
            OutputFormat::Table => self.fmt_table(f),
        }
    }
}

impl Display<'_> {
    fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        let by_date = sorted_by_date(view);

        if view.mode == DisplayMode::FullMonth {
            self.fmt_grid(f, &by_date)?;
        }

        if view.has_no_results() {
            write!(f, "{}", "No events found".italic())?;
        } else if view.instances.is_empty() {
            write!(f, "{}", "No events this month".italic())?;
        } else {
            let events = EventFormatter::with_verbose(self.formatter.verbose);
            let mut first = true;
            for date in view.visible_dates() {
                let Some(instances) = by_date.get(&date) else {
                    continue;
                };
                if !first {
                    write!(f, "\n\n")?;
                }
                first = false;

                let header = format!("{} {}", date.strftime("%a"), format_date(date));
                writeln!(f, "{}", header.bold())?;
                write!(f, "{}", events.format(instances))?;
            }
        }

        if !view.skipped.is_empty() {
            writeln!(f)?;
            let note = format!("Skipped {} malformed event record(s)", view.skipped.len());
            write!(f, "{}", note.yellow())?;
        }
        Ok(())
    }

    fn fmt_grid(
        &self,
        f: &mut fmt::Formatter<'_>,
        by_date: &BTreeMap<Date, Vec<EventInstance>>,
    ) -> fmt::Result {
        let start = self.view.window.start();
        let title = start.strftime("%B %Y").to_string();
        writeln!(f, "{:^width$}", title.bold(), width = WEEKDAY_HEADER.len())?;
        writeln!(f, "{WEEKDAY_HEADER}")?;

        let offset = start.weekday().to_monday_zero_offset();
        let mut line = "   ".repeat(offset as usize);
        let mut column = offset;
        for date in self.view.window.days() {
            let cell = format!("{:>2}", date.day());
            let cell = if Some(date) == self.formatter.today {
                cell.reversed().to_string()
            } else if by_date.contains_key(&date) {
                cell.yellow().bold().to_string()
            } else {
                cell
            };
            line.push_str(&cell);

            column += 1;
            if column == 7 {
                writeln!(f, "{line}")?;
                line.clear();
                column = 0;
            } else {
                line.push(' ');
            }
        }
        if !line.is_empty() {
            writeln!(f, "{}", line.trim_end())?;
        }
        writeln!(f)
    }

    fn fmt_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        let by_date = sorted_by_date(view);
        let days = view
            .visible_dates()
            .into_iter()
            .filter_map(|date| {
                by_date.get(&date).map(|instances| JsonDay {
                    date: format_date(date),
                    events: instances.iter().map(JsonEvent::from).collect(),
                })
            })
            .collect();

        let start = view.window.start();
        let month = JsonMonth {
            month: format!("{:04}-{:02}", start.year(), start.month()),
            mode: match view.mode {
                DisplayMode::FullMonth => "full_month",
                DisplayMode::SearchResults => "search_results",
            },
            days,
            skipped: view.skipped.iter().map(JsonSkipped::from).collect(),
        };

        let json = serde_json::to_string_pretty(&month).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

/// Instances per date, each day ordered by time of day.
fn sorted_by_date(view: &MonthView) -> BTreeMap<Date, Vec<EventInstance>> {
    view.by_date()
        .into_iter()
        .map(|(date, instances)| {
            let mut instances: Vec<_> = instances.into_iter().cloned().collect();
            instances.sort_by_key(|i| i.time);
            (date, instances)
        })
        .collect()
}

#[derive(Debug, serde::Serialize)]
struct JsonMonth {
    month: String,
    mode: &'static str,
    days: Vec<JsonDay>,
    skipped: Vec<JsonSkipped>,
}

#[derive(Debug, serde::Serialize)]
struct JsonDay {
    date: String,
    events: Vec<JsonEvent>,
}

#[derive(Debug, serde::Serialize)]
struct JsonEvent {
    id: String,
    title: String,
    time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    recurrence: String,
}

impl From<&EventInstance> for JsonEvent {
    fn from(instance: &EventInstance) -> Self {
        Self {
            id: instance.id.clone(),
            title: instance.title.clone(),
            time: format_time(instance.time),
            description: instance.description.clone(),
            recurrence: instance.recurrence.to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct JsonSkipped {
    id: Option<String>,
    reason: String,
}

impl From<&SkippedRecord> for JsonSkipped {
    fn from(skipped: &SkippedRecord) -> Self {
        Self {
            id: skipped.id.clone(),
            reason: skipped.reason.clone(),
        }
    }
}
