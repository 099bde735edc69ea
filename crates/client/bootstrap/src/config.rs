//! Host configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use companion_runtime::CompanionConfig;

/// Configuration required to bootstrap a command-line companion.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub companion: CompanionConfig,
    /// Directory holding the store and page files.
    pub data_dir: Option<PathBuf>,
    /// RON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMPANION_DATA_DIR` - Directory for store and page files (default: platform-specific)
    /// - `COMPANION_CATALOG` - RON catalog file (default: built-in armor catalog)
    /// - `COMPANION_APPLY_PAUSE_MS` - Pause between board interactions (default: 100)
    /// - `COMPANION_STATUS_CAPACITY` - Status messages kept (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("COMPANION_APPLY_PAUSE_MS") {
            config.companion.apply_pause = Duration::from_millis(millis);
        }

        if let Some(capacity) = read_env::<usize>("COMPANION_STATUS_CAPACITY") {
            config.companion.status_capacity = capacity.max(1);
        }

        config.data_dir = env::var("COMPANION_DATA_DIR").ok().map(PathBuf::from);
        config.catalog_path = env::var("COMPANION_CATALOG").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
