// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use evcal_core::Recurrence;

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id or a unique id prefix of the event")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("id")
            .cloned()
            .unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn date() -> Arg {
        arg!(-d --date <DATE> "Date of the event (YYYY-MM-DD, today or tomorrow)")
    }

    pub fn get_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("date").cloned()
    }

    pub fn time() -> Arg {
        arg!(--time <TIME> "Time of the event (HH:MM)")
    }

    pub fn get_time(matches: &ArgMatches) -> Option<String> {
        matches.get_one("time").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn recurrence() -> Arg {
        arg!(-r --recurrence <RECURRENCE> "How often the event repeats")
            .value_parser(value_parser!(Recurrence))
    }

    pub fn get_recurrence(matches: &ArgMatches) -> Option<Recurrence> {
        matches.get_one("recurrence").copied()
    }
}
