//! Chapter roster sync against the ISOC.ORG AMS
//!
//! Reconciles the chapter's local membership registry with the remote
//! membership-management system: pending AMS applications are approved,
//! denied or answered with an invitation, stray AMS members are deleted and
//! missing ones are requested from AMS support. A verification pass then
//! reports whatever did not take effect.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use orchestrator::{CycleOutcome, Orchestrator, ReconciliationPlan, RunMode};
pub use traits::{
    LocalRegistry, MembershipPortal, MockLocalRegistry, MockMembershipPortal, PortalCredentials, PortalOptions,
};
