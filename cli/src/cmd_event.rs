// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use evcal_core::{Calendar, EventDefinition, EventPatch, Recurrence};

use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::EventFormatter;
use crate::util::{OutputFormat, parse_date_arg, parse_time_arg, today};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub recurrence: Option<Recurrence>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(EventArgs::title(true))
            .arg(EventArgs::date())
            .arg(EventArgs::time())
            .arg(EventArgs::description())
            .arg(EventArgs::recurrence())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: EventArgs::get_title(matches).unwrap_or_default(),
            date: EventArgs::get_date(matches),
            time: EventArgs::get_time(matches),
            description: EventArgs::get_description(matches),
            recurrence: EventArgs::get_recurrence(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let date = match &self.date {
            Some(date) => parse_date_arg(date, today())?,
            None => today(),
        };

        let mut draft = calendar.new_draft(date);
        draft.title = self.title;
        if let Some(time) = &self.time {
            draft.time = parse_time_arg(time)?;
        }
        draft.description = self.description;
        draft.recurrence = self.recurrence.unwrap_or_default();

        let event = calendar.add(draft).await?;
        print_events(&[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub recurrence: Option<Recurrence>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(EventArgs::id())
            .arg(EventArgs::title(false))
            .arg(EventArgs::date())
            .arg(EventArgs::time())
            .arg(EventArgs::description().long_help(
                "Description of the event. Pass an empty string to remove the description.",
            ))
            .arg(EventArgs::recurrence())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            title: EventArgs::get_title(matches),
            date: EventArgs::get_date(matches),
            time: EventArgs::get_time(matches),
            description: EventArgs::get_description(matches),
            recurrence: EventArgs::get_recurrence(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let patch = self.patch()?;
        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field to edit".into());
        }

        let event = calendar.update(&self.id, &patch).await?;
        print_events(&[event], self.output_format, self.verbose);
        Ok(())
    }

    fn patch(&self) -> Result<EventPatch, Box<dyn Error>> {
        let date = match &self.date {
            Some(date) => Some(parse_date_arg(date, today())?),
            None => None,
        };
        let time = match &self.time {
            Some(time) => Some(parse_time_arg(time)?),
            None => None,
        };
        let description = self
            .description
            .as_ref()
            .map(|d| (!d.is_empty()).then(|| d.clone()));

        Ok(EventPatch {
            title: self.title.clone(),
            date,
            time,
            description,
            recurrence: self.recurrence,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
    pub output_format: OutputFormat,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event, with all of its occurrences")
            .arg(EventArgs::id())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let event = calendar.delete(&self.id).await?;
        if self.output_format == OutputFormat::Table {
            println!("{} {}", "Deleted:".yellow(), event.title);
        } else {
            print_events(&[event], self.output_format, true);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventMove {
    pub id: String,
    pub date: String,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("mv")
            .about("Move a one-off event to another date")
            .arg(EventArgs::id())
            .arg(arg!(date: <DATE> "The new date (YYYY-MM-DD, today or tomorrow)"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            date: matches
                .get_one::<String>("date")
                .cloned()
                .unwrap_or_default(),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving event...");
        let date = parse_date_arg(&self.date, today())?;
        let event = calendar.reschedule(&self.id, date).await?;
        print_events(&[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List all stored events")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let mut events = calendar.events().to_vec();
        events.sort_by_key(|e| (e.date, e.time));

        let rejected = calendar.store().rejected().count();
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events yet".italic());
        } else {
            print_events(&events, self.output_format, self.verbose);
        }
        if rejected > 0 {
            tracing::warn!(rejected, "some stored records could not be read");
        }
        Ok(())
    }
}

fn print_events(events: &[EventDefinition], output_format: OutputFormat, verbose: bool) {
    let formatter = EventFormatter::with_verbose(verbose).with_output_format(output_format);
    println!("{}", formatter.format(events));
}
