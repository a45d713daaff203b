//! Unit tests for the reconciliation rules
//!
//! These tests drive the pure reconciler through the scenario builder and
//! check the partition properties every run relies on.

mod common;
use ams_sync::core::{MemberAction, PendingAction};
use common::{member_bucket_of, pending_bucket_of, RosterScenario, TestFixtures};
use chrono::Duration;

/// Stale invitation, stray AMS member and a local member unknown to AMS
#[test]
fn test_scenario_deny_delete_add() {
    // Arrange
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .remote_pending(TestFixtures::BOB, TestFixtures::before_cutoff())
        .remote_member(TestFixtures::CAROL);

    // Act
    let pendings = scenario.pendings();
    let members = scenario.members();

    // Assert
    assert_eq!(pendings.deny.keys().collect::<Vec<_>>(), vec![&TestFixtures::id(TestFixtures::BOB)]);
    assert!(pendings.approve.is_empty() && pendings.invite.is_empty() && pendings.noop.is_empty());
    assert_eq!(members.delete.keys().collect::<Vec<_>>(), vec![&TestFixtures::id(TestFixtures::CAROL)]);
    assert_eq!(members.add.keys().collect::<Vec<_>>(), vec![&TestFixtures::id(TestFixtures::ALICE)]);
    assert!(members.noop.is_empty());
}

/// A local application in progress suppresses both invite and deny
#[test]
fn test_scenario_local_application_waits() {
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .local_application(TestFixtures::BOB)
        .remote_pending(TestFixtures::BOB, TestFixtures::after_cutoff());

    let pendings = scenario.pendings();

    assert_eq!(pendings.noop.keys().collect::<Vec<_>>(), vec![&TestFixtures::id(TestFixtures::BOB)]);
    assert_eq!(pendings.len(), 1);
}

/// An AMS member who is also a local member needs nothing
#[test]
fn test_scenario_member_in_sync() {
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .remote_member(TestFixtures::ALICE);

    let members = scenario.members();

    assert_eq!(members.noop.keys().collect::<Vec<_>>(), vec![&TestFixtures::id(TestFixtures::ALICE)]);
    assert!(members.delete.is_empty());
    assert!(members.add.is_empty());
}

/// Membership beats negotiation when both rosters list the same person
#[test]
fn test_membership_takes_precedence() {
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::DAVE)
        .negotiating(TestFixtures::DAVE)
        .local_application(TestFixtures::DAVE)
        .remote_pending(TestFixtures::DAVE, TestFixtures::before_cutoff());

    let pendings = scenario.pendings();

    assert_eq!(pending_bucket_of(&pendings, &TestFixtures::id(TestFixtures::DAVE)), Some(PendingAction::Approve));
    assert!(pendings.noop.is_empty());
}

/// Strictly earlier than the cutoff is denied, the cutoff itself is invited
#[test]
fn test_cutoff_boundary() {
    let scenario = RosterScenario::new()
        .remote_pending(TestFixtures::ALICE, TestFixtures::cutoff())
        .remote_pending(TestFixtures::BOB, TestFixtures::cutoff() - Duration::seconds(1))
        .remote_pending(TestFixtures::CAROL, TestFixtures::after_cutoff());

    let pendings = scenario.pendings();

    assert_eq!(pending_bucket_of(&pendings, &TestFixtures::id(TestFixtures::ALICE)), Some(PendingAction::Invite));
    assert_eq!(pending_bucket_of(&pendings, &TestFixtures::id(TestFixtures::BOB)), Some(PendingAction::Deny));
    assert_eq!(pending_bucket_of(&pendings, &TestFixtures::id(TestFixtures::CAROL)), Some(PendingAction::Invite));
}

/// A local member already queued on AMS is not escalated to support
#[test]
fn test_pending_member_is_not_added() {
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .local_member(TestFixtures::BOB)
        .remote_pending(TestFixtures::ALICE, TestFixtures::after_cutoff());

    let members = scenario.members();

    assert_eq!(member_bucket_of(&members, &TestFixtures::id(TestFixtures::ALICE)), None);
    assert_eq!(member_bucket_of(&members, &TestFixtures::id(TestFixtures::BOB)), Some(MemberAction::Add));
}

/// Every pending application ends up in exactly one bucket
#[test]
fn test_pending_partition_is_exhaustive_and_disjoint() {
    let mut scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .negotiating(TestFixtures::BOB)
        .local_application(TestFixtures::CAROL)
        .remote_pending(TestFixtures::ALICE, TestFixtures::before_cutoff())
        .remote_pending(TestFixtures::BOB, TestFixtures::before_cutoff())
        .remote_pending(TestFixtures::CAROL, TestFixtures::after_cutoff())
        .remote_pending(TestFixtures::DAVE, TestFixtures::before_cutoff());
    scenario
        .remote_pending
        .extend(TestFixtures::many_applications(50, TestFixtures::cutoff()));
    scenario
        .remote_pending
        .extend(TestFixtures::many_applications(10, TestFixtures::before_cutoff()).into_iter().map(|(id, a)| {
            (shared::MemberId::new(format!("8{}", id)).unwrap(), a)
        }));

    let pendings = scenario.pendings();

    assert_eq!(pendings.len(), scenario.remote_pending.len());
    for id in scenario.remote_pending.keys() {
        let hits = [
            pendings.approve.contains_key(id),
            pendings.deny.contains_key(id),
            pendings.invite.contains_key(id),
            pendings.noop.contains_key(id),
        ]
        .iter()
        .filter(|hit| **hit)
        .count();
        assert_eq!(hits, 1, "{id} must be in exactly one bucket");
    }
    assert_eq!(pendings.approve.len(), 1);
    assert_eq!(pendings.noop.len(), 2);
    assert_eq!(pendings.deny.len(), 11);
    assert_eq!(pendings.invite.len(), 50);
}

/// Every AMS member is either kept or deleted, never both
#[test]
fn test_member_partition_covers_remote_side() {
    let scenario = RosterScenario::new()
        .local_member(TestFixtures::ALICE)
        .local_member(TestFixtures::BOB)
        .remote_member(TestFixtures::ALICE)
        .remote_member(TestFixtures::CAROL)
        .remote_member(TestFixtures::DAVE);

    let members = scenario.members();

    for id in scenario.remote_members.keys() {
        assert_ne!(members.delete.contains_key(id), members.noop.contains_key(id));
    }
    assert_eq!(members.delete.len() + members.noop.len(), scenario.remote_members.len());
    assert!(members.add.keys().all(|id| !scenario.remote_members.contains_key(id)));
}

/// Empty rosters produce empty plans
#[test]
fn test_empty_rosters() {
    let scenario = RosterScenario::new();

    assert!(scenario.pendings().is_empty());
    assert_eq!(scenario.members(), Default::default());
}
