//! Builds a file-backed companion for command-line hosts.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use companion_runtime::{
    CatalogLoader, Companion, FallbackStore, FilePage, FileStore, InMemorySelection,
};
use flame_core::Catalog;

use crate::config::CliConfig;
use crate::dirs;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

/// Companion assembled from files under the data directory.
pub type FileCompanion = Companion<
    FallbackStore<FileStore, FileStore>,
    FilePage,
    Arc<InMemorySelection>,
    Arc<InMemorySelection>,
>;

/// Builder that assembles storage, the option board and configuration.
pub struct CompanionSetupBuilder {
    config: CliConfig,
}

impl CompanionSetupBuilder {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub async fn build(self) -> Result<CompanionSetup> {
        let data_dir = self.config.data_dir.clone().unwrap_or_else(dirs::data_dir);
        tracing::info!("Using data directory {}", data_dir.display());

        let primary = FileStore::open(data_dir.join("storage.json"))
            .await
            .context("Failed to open primary store")?;
        let secondary = FileStore::open(data_dir.join("storage.backup.json"))
            .await
            .context("Failed to open secondary store")?;
        let page = FilePage::open(data_dir.join("page.json")).context("Failed to open page state")?;

        let catalog = load_catalog(self.config.catalog_path.as_deref())?;
        let board = Arc::new(InMemorySelection::new(catalog));

        let mut companion = Companion::builder(
            FallbackStore::new(primary, secondary),
            page,
            board.clone(),
            board,
        )
        .config(self.config.companion.clone())
        .build();
        companion.init().await?;

        Ok(CompanionSetup {
            config: self.config,
            data_dir,
            companion,
        })
    }
}

pub struct CompanionSetup {
    pub config: CliConfig,
    pub data_dir: PathBuf,
    pub companion: FileCompanion,
}

/// Read the catalog file, or the built-in armor catalog when none is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => CatalogLoader::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => CatalogLoader::parse(BUILTIN_CATALOG).context("Built-in catalog is invalid"),
    }
}

#[cfg(test)]
mod tests {
    use flame_core::LineKind;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn builtin_catalog_covers_every_line() {
        let catalog = load_catalog(None).unwrap();
        for line in LineKind::ALL {
            assert_eq!(catalog.tiers(line).len(), 7, "{line} has no tiers");
        }
        assert!(!catalog.has_negative_tiers());
    }

    #[tokio::test]
    async fn setup_persists_characters_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..CliConfig::default()
        };

        let mut setup = CompanionSetupBuilder::new(config.clone()).build().await.unwrap();
        setup.companion.save_character("Hero").await.unwrap();
        assert!(dir.path().join("storage.json").exists());

        let reopened = CompanionSetupBuilder::new(config).build().await.unwrap();
        assert_eq!(reopened.companion.characters().characters().len(), 1);
    }
}
