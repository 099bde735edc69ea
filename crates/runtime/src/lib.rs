//! Runtime orchestration for the calculator companion.
//!
//! This crate wires together persistent storage, page-state snapshots, the
//! character manager, and flame solving into a cohesive API. Hosts embed
//! [`Companion`] to save and load characters, solve flames, and answer popup
//! requests.
//!
//! Modules are organized by responsibility:
//! - [`companion`] hosts the orchestrator and builder
//! - [`api`] exposes requests, status messages and the unified error type
//! - [`character`] keeps saved profiles in step with the store
//! - [`flames`] reads catalogs and applies solutions to the option board
//! - [`transfer`] imports and exports character data
//! - [`repository`] and [`page`] provide storage adapters reused by hosts
//! - [`readiness`], [`settings`] and [`popup`] hold the smaller page concerns
pub mod api;
pub mod character;
pub mod companion;
pub mod flames;
pub mod page;
pub mod popup;
pub mod readiness;
pub mod repository;
pub mod settings;
pub mod transfer;

pub use api::{
    ErrorKind, Request, Response, Result, RuntimeError, StatusLevel, StatusLog, StatusMessage,
};
pub use character::{AutoSaveTrigger, Character, CharacterError, CharacterId, CharacterManager};
pub use companion::{Companion, CompanionBuilder, CompanionConfig};
pub use flames::{
    ApplyReport, CatalogLoader, CatalogSource, FlameError, FlameOutcome, FlameService,
    InMemorySelection, SelectionSink, StaticCatalog, apply_solution,
};
pub use page::{FilePage, InMemoryPage, PageSnapshot, PageStorage};
pub use popup::{ConfirmGate, KnownPage, PendingAction, PopupCommand, PopupEffect};
pub use readiness::{Readiness, ReadinessPolicy, wait_until};
pub use repository::{
    FallbackStore, FileStore, InMemoryStore, KeyValueStore, RepositoryError, StoreMap,
};
pub use transfer::{ExportDocument, ImportPlan, ImportSummary, TransferError, export_file_name};
