//! Post-action verification results
//!
//! After the bulk AMS calls the portal re-reads its state and compares it
//! with what those calls should have produced. Whatever is still out of
//! place ends up in a [`DivergenceReport`].

use shared::{MemberId, PendingApplication, Person, Roster};
use std::collections::BTreeSet;

/// What the AMS should look like once the requested actions took effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedOutcome {
    /// Must have left the pending queue (as members)
    pub approved: BTreeSet<MemberId>,
    /// Must have left the pending queue
    pub denied: BTreeSet<MemberId>,
    /// Must have left the member list
    pub deleted: BTreeSet<MemberId>,
}

impl ExpectedOutcome {
    pub fn record_approved<T>(&mut self, roster: &Roster<T>) {
        self.approved.extend(roster.keys().cloned());
    }

    pub fn record_denied<T>(&mut self, roster: &Roster<T>) {
        self.denied.extend(roster.keys().cloned());
    }

    pub fn record_deleted<T>(&mut self, roster: &Roster<T>) {
        self.deleted.extend(roster.keys().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty() && self.denied.is_empty() && self.deleted.is_empty()
    }
}

/// Residual divergence between expected and observed AMS state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivergenceReport {
    /// Still pending although approval was requested
    pub not_approved: Roster<PendingApplication>,
    /// Still pending although denial was requested
    pub not_denied: Roster<PendingApplication>,
    /// Still members although deletion was requested
    pub not_deleted: Roster<Person>,
}

impl DivergenceReport {
    /// Compare the re-read AMS state against the expected outcome
    pub fn compute(
        expected: &ExpectedOutcome,
        pending: &Roster<PendingApplication>,
        members: &Roster<Person>,
    ) -> Self {
        let still_in = |ids: &BTreeSet<MemberId>, roster: &Roster<PendingApplication>| {
            ids.iter()
                .filter_map(|id| roster.get(id).map(|record| (id.clone(), record.clone())))
                .collect::<Roster<PendingApplication>>()
        };

        Self {
            not_approved: still_in(&expected.approved, pending),
            not_denied: still_in(&expected.denied, pending),
            not_deleted: expected
                .deleted
                .iter()
                .filter_map(|id| members.get(id).map(|record| (id.clone(), record.clone())))
                .collect(),
        }
    }

    /// True when every requested action took effect
    pub fn is_converged(&self) -> bool {
        self.not_approved.is_empty() && self.not_denied.is_empty() && self.not_deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.not_approved.len() + self.not_denied.len() + self.not_deleted.len()
    }
}

/// Result of asking the portal to verify its own actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Verification ran; the report may still be empty
    Divergence(DivergenceReport),
    /// Verification could not complete; logged verbatim
    Diagnostic(String),
}

impl VerificationOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, VerificationOutcome::Divergence(report) if report.is_converged())
    }
}
