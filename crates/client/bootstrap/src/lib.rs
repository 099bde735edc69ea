//! Shared bootstrap utilities for companion hosts.
//!
//! Provides configuration loading, platform directories, and companion setup
//! that can be reused by the CLI or other front-end crates.
pub mod builder;
pub mod config;
pub mod dirs;

pub use builder::{CompanionSetup, CompanionSetupBuilder, FileCompanion, load_catalog};
pub use config::CliConfig;
