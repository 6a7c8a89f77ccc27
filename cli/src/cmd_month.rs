// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use evcal_core::{Calendar, Query};

use crate::arg::CommonArgs;
use crate::month_formatter::MonthFormatter;
use crate::util::{OutputFormat, parse_month_arg, today};

#[derive(Debug, Default, Clone)]
pub struct CmdMonth {
    pub month: Option<String>,
    pub query: Option<String>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show a month with its events, optionally filtered by a search query")
            .arg(arg!(month: [MONTH] "The month to show (YYYY-MM, prev or next), defaults to the current one"))
            .arg(arg!(query: -q --query <QUERY> "Only show events whose title contains QUERY"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: matches.get_one("month").cloned(),
            query: matches.get_one("query").cloned(),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month...");
        let today = today();
        let (year, month) = parse_month_arg(self.month.as_deref(), today)?;
        let query = Query::new(self.query.as_deref().unwrap_or_default());

        let view = calendar.month_view(year, month, &query)?;
        for skipped in &view.skipped {
            tracing::warn!(id = ?skipped.id, reason = %skipped.reason, "skipped event record");
        }

        let formatter = MonthFormatter::new(Some(today))
            .with_verbose(self.verbose)
            .with_output_format(self.output_format);
        println!("{}", formatter.format(&view));

        if self.output_format == OutputFormat::Table
            && !query.is_empty()
            && !view.has_no_results()
        {
            let count = view.instances.len();
            println!("{}", format!("{count} occurrence(s) match").italic());
        }
        Ok(())
    }
}
