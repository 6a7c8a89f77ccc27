// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use evcal_core::{DateWindow, parse_date, parse_month, parse_time};
use jiff::Zoned;
use jiff::civil::{Date, Time};

/// The output format for commands
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Parses a `YYYY-MM-DD` date, accepting `today` and `tomorrow`.
pub fn parse_date_arg(s: &str, today: Date) -> Result<Date, Box<dyn Error>> {
    match s.trim() {
        "today" => Ok(today),
        "tomorrow" => Ok(today.tomorrow()?),
        "yesterday" => Ok(today.yesterday()?),
        s => Ok(parse_date(s)?),
    }
}

/// Parses an `HH:MM` time.
pub fn parse_time_arg(s: &str) -> Result<Time, Box<dyn Error>> {
    Ok(parse_time(s)?)
}

/// Parses a `YYYY-MM` month, accepting `prev` and `next` relative to the
/// month of `today`, which is also the default.
pub fn parse_month_arg(s: Option<&str>, today: Date) -> Result<(i16, i8), Box<dyn Error>> {
    let current = DateWindow::month_of(today);
    let window = match s.map(str::trim) {
        None => current,
        Some("prev") => current.prev_month().ok_or("No month before this one")?,
        Some("next") => current.next_month().ok_or("No month after this one")?,
        Some(s) => return Ok(parse_month(s)?),
    };
    Ok((window.start().year(), window.start().month()))
}
