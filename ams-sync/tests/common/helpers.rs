//! Test helpers and builder patterns for ams-sync tests
//!
//! This module provides convenient helper functions and builder patterns
//! to reduce test boilerplate and improve maintainability.

use ams_sync::core::{
    reconcile_members, reconcile_pendings, LocalRosters, MemberAction, MemberActions, PendingAction, PendingActions,
};
use ams_sync::{MockLocalRegistry, MockMembershipPortal, Orchestrator, PortalCredentials};
use chrono::{DateTime, Utc};
use shared::{MemberId, PendingApplication, Person, Roster};

use super::fixtures::TestFixtures;

/// Builder for both sides of a reconciliation, keyed by fixture identifiers
#[derive(Clone)]
pub struct RosterScenario {
    pub local: LocalRosters,
    pub remote_pending: Roster<PendingApplication>,
    pub remote_members: Roster<Person>,
}

impl RosterScenario {
    /// Empty rosters with the standard invitation cutoff
    pub fn new() -> Self {
        Self {
            local: LocalRosters {
                members: Roster::new(),
                applications: Roster::new(),
                in_negotiations: Roster::new(),
                last_invite_date: TestFixtures::cutoff(),
            },
            remote_pending: Roster::new(),
            remote_members: Roster::new(),
        }
    }

    pub fn local_member(mut self, raw: &str) -> Self {
        self.local.members.insert(TestFixtures::id(raw), TestFixtures::person(raw));
        self
    }

    pub fn local_application(mut self, raw: &str) -> Self {
        self.local.applications.insert(TestFixtures::id(raw), TestFixtures::person(raw));
        self
    }

    pub fn negotiating(mut self, raw: &str) -> Self {
        self.local.in_negotiations.insert(TestFixtures::id(raw), TestFixtures::person(raw));
        self
    }

    pub fn remote_pending(mut self, raw: &str, date: DateTime<Utc>) -> Self {
        self.remote_pending.insert(TestFixtures::id(raw), TestFixtures::application(raw, date));
        self
    }

    pub fn remote_member(mut self, raw: &str) -> Self {
        self.remote_members.insert(TestFixtures::id(raw), TestFixtures::person(raw));
        self
    }

    pub fn pendings(&self) -> PendingActions {
        reconcile_pendings(&self.remote_pending, &self.local)
    }

    pub fn members(&self) -> MemberActions {
        reconcile_members(&self.remote_members, &self.local.members, &self.remote_pending)
    }
}

/// Bucket holding a pending application, if any
pub fn pending_bucket_of(actions: &PendingActions, id: &MemberId) -> Option<PendingAction> {
    PendingAction::ALL.into_iter().find(|action| actions.bucket(*action).contains_key(id))
}

/// Bucket holding a member record, if any
pub fn member_bucket_of(actions: &MemberActions, id: &MemberId) -> Option<MemberAction> {
    MemberAction::ALL.into_iter().find(|action| actions.bucket(*action).contains_key(id))
}

/// Builder pattern for creating test orchestrators over mocks.
///
/// Only the read side is pre-wired; every mutating call must be expected
/// explicitly by the test, so an unexpected one panics.
pub struct OrchestratorBuilder {
    registry: MockLocalRegistry,
    portal: MockMembershipPortal,
}

impl OrchestratorBuilder {
    /// Create a builder whose collaborators serve the given scenario
    pub fn new(scenario: &RosterScenario) -> Self {
        let mut registry = MockLocalRegistry::new();
        let mut portal = MockMembershipPortal::new();

        let local = scenario.local.clone();
        registry.expect_rosters().returning(move || Ok(local.clone())).times(0..);
        registry
            .expect_credentials()
            .returning(|| PortalCredentials::new(TestFixtures::ACCOUNT, "secret"))
            .times(0..);

        let pending = scenario.remote_pending.clone();
        portal
            .expect_pending_applications()
            .returning(move || Ok(pending.clone()))
            .times(0..);

        let members = scenario.remote_members.clone();
        portal.expect_members().returning(move || Ok(members.clone())).times(0..);

        Self { registry, portal }
    }

    /// Configure the registry mock with a setup function
    pub fn with_registry<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockLocalRegistry),
    {
        setup(&mut self.registry);
        self
    }

    /// Configure the portal mock with a setup function
    pub fn with_portal<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockMembershipPortal),
    {
        setup(&mut self.portal);
        self
    }

    pub fn build(self) -> Orchestrator<MockLocalRegistry, MockMembershipPortal> {
        Orchestrator::new(self.registry, self.portal)
    }
}
