//! Public runtime API surface.
//!
//! This module gathers the types exposed to hosts of the runtime crate:
//! popup requests, status messages, and the unified error type.

pub mod errors;
pub mod request;
pub mod status;

pub use errors::{ErrorKind, Result, RuntimeError};
pub use request::{Request, Response};
pub use status::{StatusLevel, StatusLog, StatusMessage};
