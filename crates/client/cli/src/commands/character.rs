//! Character profile commands.
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use companion_bootstrap::FileCompanion;
use companion_runtime::CharacterId;

use crate::output;

/// Manage saved characters
#[derive(Subcommand, Debug)]
pub enum Character {
    /// List saved characters by name
    List,

    /// Save the current page state as a new character
    Save {
        /// Character name
        name: String,
    },

    /// Restore a character's page state
    Load {
        /// Character name or id
        character: String,
    },

    /// Overwrite a character with the current page state
    Update {
        /// Character name or id
        character: String,
    },

    /// Delete a character
    Delete {
        /// Character name or id
        character: String,
    },
}

impl Character {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        match self {
            Character::List => {
                let manager = companion.characters();
                let current = manager.current_id();
                let sorted = manager.characters_sorted();
                if sorted.is_empty() {
                    println!("No saved characters.");
                }
                for character in sorted {
                    output::print_character(character, current == Some(&character.id));
                }
            }
            Character::Save { name } => {
                companion.save_character(&name).await?;
            }
            Character::Load { character } => {
                let id = resolve(companion, &character)?;
                companion.load_character(&id).await?;
            }
            Character::Update { character } => {
                let id = resolve(companion, &character)?;
                companion.update_character(&id).await?;
            }
            Character::Delete { character } => {
                let id = resolve(companion, &character)?;
                companion.delete_character(&id).await?;
            }
        }
        Ok(())
    }
}

/// React to a calculator button click
#[derive(Parser, Debug)]
pub struct Click {
    /// Button text as shown on the page
    pub text: String,
}

impl Click {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        if companion.on_button_click(&self.text).await?.is_none() {
            tracing::debug!("Button \"{}\" did not trigger an auto-save", self.text);
        }
        Ok(())
    }
}

/// Match an id first, then a name.
fn resolve(companion: &FileCompanion, needle: &str) -> Result<CharacterId> {
    let characters = companion.characters().characters();
    let found = characters
        .iter()
        .find(|c| c.id.as_str() == needle)
        .or_else(|| characters.iter().find(|c| c.name == needle));

    match found {
        Some(character) => Ok(character.id.clone()),
        None => bail!("no character named or identified by \"{needle}\""),
    }
}
