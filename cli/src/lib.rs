// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface for evcal, a month calendar with recurring events.

mod arg;
mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_month;
mod config;
mod event_formatter;
mod month_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::util::OutputFormat;
