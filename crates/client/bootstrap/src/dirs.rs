//! Platform-specific directory utilities.

use std::path::PathBuf;

const APPLICATION: &str = "whackybeanz-companion";

/// Platform data directory, e.g. `~/.local/share/whackybeanz-companion` on Linux.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./companion_data"))
}

/// Platform log directory, e.g. `~/.cache/whackybeanz-companion/logs` on Linux.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/whackybeanz-companion"))
        .join("logs")
}
