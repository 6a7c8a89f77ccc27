// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use evcal_core::{APP_NAME, Calendar};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventMove, CmdEventNew};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_month::CmdMonth;
use crate::config::parse_config;

/// Run the evcal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(2);
        }
    };
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A month calendar with recurring events, conflict checks and search.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to month
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Falls back to $EVCAL_CONFIG, then to \
$XDG_CONFIG_HOME/evcal/config.toml on Linux and MacOS, %APPDATA%/evcal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(CmdMonth::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command())
                    .subcommand(CmdEventMove::command())
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => {
                    EventDelete(CmdEventDelete::from(matches))
                }
                Some((CmdEventMove::NAME, matches)) => EventMove(CmdEventMove::from(matches)),
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((name, _)) => return Err(format!("Unknown event command: {name}").into()),
                None => return Err("An event command is required".into()),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
            None => Month(CmdMonth::default()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show a month, optionally filtered
    Month(CmdMonth),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Move an event to another date
    EventMove(CmdEventMove),

    /// List stored events
    EventList(CmdEventList),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Month(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventMove(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Calendar) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let mut calendar = Calendar::new(core_config).await?;
        tracing::debug!(events = calendar.events().len(), "calendar loaded");

        f(&mut calendar).await
    }
}
