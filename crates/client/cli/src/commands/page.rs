//! Page state commands.
//!
//! Destructive actions arm the companion's confirm gate and only run once
//! the user answers yes.
use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use companion_bootstrap::FileCompanion;
use companion_runtime::{KnownPage, PopupCommand, PopupEffect};
use console::style;

/// Clear page state or reset all saved data
#[derive(Subcommand, Debug)]
pub enum Page {
    /// Clear the calculator's page state
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove every saved character and setting
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show or set the expanded flames table preference
    ExpandFlames {
        /// New value; omit to print the current one
        enable: Option<bool>,
    },
}

impl Page {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        let (command, yes) = match self {
            Page::Clear { yes } => (PopupCommand::ClearPage, yes),
            Page::Reset { yes } => (PopupCommand::ResetAll, yes),
            Page::ExpandFlames { enable: Some(enable) } => {
                companion.set_expand_flames(enable)?;
                return Ok(());
            }
            Page::ExpandFlames { enable: None } => {
                println!("{}", companion.flames_expanded());
                return Ok(());
            }
        };

        if let PopupEffect::Armed(action) = companion.popup(command).await? {
            let answer = if yes { PopupCommand::Confirm } else { prompt(&action.to_string())? };
            companion.popup(answer).await?;
        }
        Ok(())
    }
}

fn prompt(action: &str) -> Result<PopupCommand> {
    print!(
        "{} Really {}? [y/N] ",
        style("?").yellow().bold(),
        style(action).bold()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(match input.trim().to_lowercase().as_str() {
        "y" | "yes" => PopupCommand::Confirm,
        _ => PopupCommand::Cancel,
    })
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Target {
    EquipSetup,
    Flames,
    Symbols,
}

impl From<Target> for KnownPage {
    fn from(target: Target) -> Self {
        match target {
            Target::EquipSetup => KnownPage::EquipSetup,
            Target::Flames => KnownPage::Flames,
            Target::Symbols => KnownPage::Symbols,
        }
    }
}

/// Print the URL of a calculator page
#[derive(Parser, Debug)]
pub struct Open {
    #[arg(value_enum)]
    pub page: Target,
}

impl Open {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        if let PopupEffect::OpenUrl(url) = companion.popup(PopupCommand::Open(self.page.into())).await? {
            println!("{url}");
        }
        Ok(())
    }
}
