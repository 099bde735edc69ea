//! Export, import and backup restore commands.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use companion_bootstrap::FileCompanion;
use companion_runtime::export_file_name;
use console::style;

/// Export characters and settings to a JSON file
#[derive(Parser, Debug)]
pub struct Export {
    /// Output file (default: whackybeanz-data-<date>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Export {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        let document = companion.export()?;
        let json = document.to_json_pretty()?;

        let path = self
            .output
            .unwrap_or_else(|| PathBuf::from(export_file_name(chrono::Local::now().date_naive())));
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        println!("{} {}", style("Wrote").dim(), path.display());
        Ok(())
    }
}

/// Import characters and settings from a JSON file
#[derive(Parser, Debug)]
pub struct Import {
    pub file: PathBuf,
}

impl Import {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        companion.import(&text).await?;
        Ok(())
    }
}

/// Replace all saved data with a raw backup
#[derive(Parser, Debug)]
pub struct RestoreBackup {
    pub file: PathBuf,
}

impl RestoreBackup {
    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        companion.restore_backup(&text).await?;
        Ok(())
    }
}
