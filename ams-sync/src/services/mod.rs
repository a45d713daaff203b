//! Service implementations
//!
//! This module contains the file-backed implementations of the service
//! traits. These are the production implementations that handle actual I/O.

pub mod json_store;
pub mod local_registry;
pub mod outbox;
pub mod portal;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use local_registry::{FileRegistry, RegistryDocument, RegistryMail};
pub use outbox::{OutgoingMail, Outbox};
pub use portal::{FilePortal, PortalSnapshot};
