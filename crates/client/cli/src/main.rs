//! Command-line companion entry point.
//!
//! Drives the calculator companion against file-backed page state, the way
//! the browser popup drives it against the live page.
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Character, Click, Export, Import, Open, Page, RestoreBackup, Solve};
use companion_bootstrap::{CliConfig, CompanionSetupBuilder, dirs};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Calculator companion: character profiles and flame solving
#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Companion for the whackybeanz calculator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Solve flame targets and apply the first solution
    Solve(Solve),

    /// Manage saved characters
    #[command(subcommand)]
    Character(Character),

    /// React to a calculator button click
    Click(Click),

    /// Export characters and settings to a JSON file
    Export(Export),

    /// Import characters and settings from a JSON file
    Import(Import),

    /// Replace all saved data with a raw backup
    RestoreBackup(RestoreBackup),

    /// Clear page state or reset all saved data
    #[command(subcommand)]
    Page(Page),

    /// Print the URL of a calculator page
    Open(Open),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    setup_logging()?;

    let mut setup = CompanionSetupBuilder::new(config).build().await?;
    let companion = &mut setup.companion;

    let result = match cli.command {
        Command::Solve(cmd) => cmd.execute(companion).await,
        Command::Character(cmd) => cmd.execute(companion).await,
        Command::Click(cmd) => cmd.execute(companion).await,
        Command::Export(cmd) => cmd.execute(companion).await,
        Command::Import(cmd) => cmd.execute(companion).await,
        Command::RestoreBackup(cmd) => cmd.execute(companion).await,
        Command::Page(cmd) => cmd.execute(companion).await,
        Command::Open(cmd) => cmd.execute(companion).await,
    };

    output::print_status(companion.status_mut());
    companion.teardown();
    result
}

/// Setup logging to a file under the platform log directory
fn setup_logging() -> Result<()> {
    let log_dir = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "companion.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // Terminal output is reserved for status messages.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Log file: {}/companion.log", log_dir.display());
    Ok(())
}
