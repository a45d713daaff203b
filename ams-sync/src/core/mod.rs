//! Core business logic modules
//!
//! This module contains pure business logic with no I/O dependencies.
//! All functions are deterministic and easily testable.

pub mod divergence;
pub mod reconciler;
pub mod report;

pub use divergence::{DivergenceReport, ExpectedOutcome, VerificationOutcome};
pub use reconciler::{
    classify_pending, reconcile_members, reconcile_pendings, LocalRosters, MemberAction, MemberActions,
    PendingAction, PendingActions,
};
pub use report::{ActionPlanReport, NOOP_DISPLAY_LIMIT};
