// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::generate;

use crate::Cli;

#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a shell completion script for evcal")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "The shell to generate completions for")
                    .value_parser(value_parser!(Shell)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let shell = matches
            .get_one::<Shell>("shell")
            .copied()
            .ok_or("A shell is required")?;
        Ok(Self { shell })
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.generate(&mut io::stdout().lock());
        Ok(())
    }

    /// Writes the completion script for the full `evcal` command tree.
    pub fn generate(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as ClapShell;

        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_string();
        match self.shell {
            Shell::Bash => generate(ClapShell::Bash, &mut cmd, bin, buf),
            Shell::Elvish => generate(ClapShell::Elvish, &mut cmd, bin, buf),
            Shell::Fish => generate(ClapShell::Fish, &mut cmd, bin, buf),
            Shell::PowerShell => generate(ClapShell::PowerShell, &mut cmd, bin, buf),
            Shell::Zsh => generate(ClapShell::Zsh, &mut cmd, bin, buf),
            Shell::Nushell => generate(clap_complete_nushell::Nushell, &mut cmd, bin, buf),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}
