//! Terminal rendering for status messages and characters.
use companion_runtime::{Character, StatusLevel, StatusLog};
use console::style;

/// Print and clear every pending status message.
pub fn print_status(log: &mut StatusLog) {
    for message in log.drain() {
        match message.level {
            StatusLevel::Success => println!("{} {}", style("✓").green().bold(), message.text),
            StatusLevel::Info => println!("{} {}", style("•").cyan(), message.text),
            StatusLevel::Error => eprintln!("{} {}", style("✗").red().bold(), message.text),
        }
    }
}

pub fn print_character(character: &Character, current: bool) {
    let marker = if current {
        style("*").yellow().bold()
    } else {
        style(" ")
    };
    println!(
        "{} {}  {}  {}",
        marker,
        style(&character.name).bold(),
        style(character.id.as_str()).dim(),
        style(character.date_saved.format("%Y-%m-%d %H:%M")).dim(),
    );
}
