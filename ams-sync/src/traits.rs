//! Trait definitions with mockall annotations for testing
//!
//! The orchestrator only talks to the outside world through these two
//! collaborators: the local membership registry and a session on the
//! remote AMS. Both are injected so the reconciliation cycle can be driven
//! end to end against mocks.

use shared::{MemberId, PendingApplication, Person, Roster};
use std::fmt;

use crate::core::{LocalRosters, VerificationOutcome};
use crate::error::SyncResult;

/// Login for the remote AMS, handed from the registry to the portal
#[derive(Clone, PartialEq, Eq)]
pub struct PortalCredentials {
    pub username: String,
    password: String,
}

impl PortalCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for PortalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session flags for the remote AMS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalOptions {
    /// Run the session without a visible window (cosmetic only)
    pub headless: bool,
    /// Turn every mutating call into a no-op
    pub dry_run: bool,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            headless: true,
            dry_run: false,
        }
    }
}

/// Local membership registry (source of truth)
#[mockall::automock]
#[async_trait::async_trait]
pub trait LocalRegistry: Send + Sync {
    /// Fetch members, applications, negotiations and the invitation cutoff
    async fn rosters(&self) -> SyncResult<LocalRosters>;

    /// Credentials the AMS session should log in with
    fn credentials(&self) -> PortalCredentials;

    /// Send an invitation to become a chapter member.
    ///
    /// Advances the invitation cutoff as a side effect.
    async fn invite(&self, id: &MemberId, application: &PendingApplication) -> SyncResult<()>;

    /// Ask AMS support to add these local members on the remote side
    async fn notify_support(&self, members: &Roster<Person>) -> SyncResult<()>;
}

/// Session on the remote membership-management system
///
/// Mutating calls are bulk operations and must do nothing under dry run.
#[mockall::automock]
#[async_trait::async_trait]
pub trait MembershipPortal: Send + Sync {
    /// Applications currently waiting for a decision on the AMS
    async fn pending_applications(&self) -> SyncResult<Roster<PendingApplication>>;

    /// Chapter members currently recorded on the AMS
    async fn members(&self) -> SyncResult<Roster<Person>>;

    async fn approve_pending(&self, applications: &Roster<PendingApplication>) -> SyncResult<()>;

    async fn deny_pending(&self, applications: &Roster<PendingApplication>) -> SyncResult<()>;

    async fn delete_members(&self, members: &Roster<Person>) -> SyncResult<()>;

    /// Re-read the AMS after a settling delay and report which of the
    /// requested actions did not take effect
    async fn verify(&self) -> VerificationOutcome;
}
