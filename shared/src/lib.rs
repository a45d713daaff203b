//! Shared types for the chapter roster sync
//!
//! Contains the roster data model used by the reconciler and by every
//! adapter, plus the logging setup used by the binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
