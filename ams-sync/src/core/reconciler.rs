//! Three-way roster reconciliation
//!
//! Compares the AMS pending-application queue and member list against the
//! local registry and sorts every remote record into exactly one action
//! bucket. Classification is pointwise: the outcome for one identifier
//! never depends on any other record.

use chrono::{DateTime, Utc};
use shared::{MemberId, PendingApplication, Person, Roster};
use std::fmt;

/// Snapshot of the local registry taken once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRosters {
    /// Confirmed chapter members (source of truth)
    pub members: Roster<Person>,
    /// People invited locally who have not yet applied on the AMS
    pub applications: Roster<Person>,
    /// People mid-process locally (applied but undecided)
    pub in_negotiations: Roster<Person>,
    /// When invitations were last sent out
    pub last_invite_date: DateTime<Utc>,
}

impl LocalRosters {
    /// True when the local side is still working on this person
    pub fn is_in_progress(&self, id: &MemberId) -> bool {
        self.in_negotiations.contains_key(id) || self.applications.contains_key(id)
    }
}

/// Action for a single pending application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Approve,
    Deny,
    Invite,
    Noop,
}

impl PendingAction {
    pub const ALL: [PendingAction; 4] = [
        PendingAction::Approve,
        PendingAction::Deny,
        PendingAction::Invite,
        PendingAction::Noop,
    ];
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::Approve => write!(f, "approve"),
            PendingAction::Deny => write!(f, "deny"),
            PendingAction::Invite => write!(f, "invite"),
            PendingAction::Noop => write!(f, "noop"),
        }
    }
}

/// Action for a single member record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberAction {
    Delete,
    Add,
    Noop,
}

impl MemberAction {
    pub const ALL: [MemberAction; 3] = [MemberAction::Delete, MemberAction::Add, MemberAction::Noop];
}

impl fmt::Display for MemberAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberAction::Delete => write!(f, "delete"),
            MemberAction::Add => write!(f, "add"),
            MemberAction::Noop => write!(f, "noop"),
        }
    }
}

/// Partition of the AMS pending-application queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    pub approve: Roster<PendingApplication>,
    pub deny: Roster<PendingApplication>,
    pub invite: Roster<PendingApplication>,
    pub noop: Roster<PendingApplication>,
}

impl PendingActions {
    /// Records classified with the given action
    pub fn bucket(&self, action: PendingAction) -> &Roster<PendingApplication> {
        match action {
            PendingAction::Approve => &self.approve,
            PendingAction::Deny => &self.deny,
            PendingAction::Invite => &self.invite,
            PendingAction::Noop => &self.noop,
        }
    }

    /// One-line bucket sizes, e.g. `approve=1 deny=0 invite=2 noop=0`
    pub fn summary(&self) -> String {
        bucket_summary(PendingAction::ALL.iter().map(|action| (action, self.bucket(*action).len())))
    }

    pub fn len(&self) -> usize {
        self.approve.len() + self.deny.len() + self.invite.len() + self.noop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, action: PendingAction) -> &mut Roster<PendingApplication> {
        match action {
            PendingAction::Approve => &mut self.approve,
            PendingAction::Deny => &mut self.deny,
            PendingAction::Invite => &mut self.invite,
            PendingAction::Noop => &mut self.noop,
        }
    }
}

/// Partition of the member lists.
///
/// `delete` and `noop` hold AMS member records, `add` holds local member
/// records that the AMS does not know about yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberActions {
    pub delete: Roster<Person>,
    pub add: Roster<Person>,
    pub noop: Roster<Person>,
}

impl MemberActions {
    pub fn bucket(&self, action: MemberAction) -> &Roster<Person> {
        match action {
            MemberAction::Delete => &self.delete,
            MemberAction::Add => &self.add,
            MemberAction::Noop => &self.noop,
        }
    }

    pub fn summary(&self) -> String {
        bucket_summary(MemberAction::ALL.iter().map(|action| (action, self.bucket(*action).len())))
    }
}

fn bucket_summary<A: fmt::Display>(sizes: impl Iterator<Item = (A, usize)>) -> String {
    sizes
        .map(|(action, size)| format!("{action}={size}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify one pending application.
///
/// Precedence matters because the local rosters may overlap: a confirmed
/// member wins over any in-progress entry, and only records unknown locally
/// are split on the invitation cutoff (strictly earlier means denied).
pub fn classify_pending(id: &MemberId, application: &PendingApplication, local: &LocalRosters) -> PendingAction {
    if local.members.contains_key(id) {
        PendingAction::Approve
    } else if local.is_in_progress(id) {
        PendingAction::Noop
    } else if application.date < local.last_invite_date {
        PendingAction::Deny
    } else {
        PendingAction::Invite
    }
}

/// Sort every AMS pending application into approve/deny/invite/noop
pub fn reconcile_pendings(remote_pending: &Roster<PendingApplication>, local: &LocalRosters) -> PendingActions {
    let mut actions = PendingActions::default();
    for (id, application) in remote_pending {
        let action = classify_pending(id, application, local);
        actions.bucket_mut(action).insert(id.clone(), application.clone());
    }
    actions
}

/// Compare AMS members with local members.
///
/// Every AMS member lands in `noop` or `delete`. Local members that are
/// neither AMS members nor already queued as AMS pending applications land
/// in `add`.
pub fn reconcile_members(
    remote_members: &Roster<Person>,
    local_members: &Roster<Person>,
    remote_pending: &Roster<PendingApplication>,
) -> MemberActions {
    let mut actions = MemberActions::default();

    for (id, member) in remote_members {
        if local_members.contains_key(id) {
            actions.noop.insert(id.clone(), member.clone());
        } else {
            actions.delete.insert(id.clone(), member.clone());
        }
    }

    for (id, member) in local_members {
        if !remote_members.contains_key(id) && !remote_pending.contains_key(id) {
            actions.add.insert(id.clone(), member.clone());
        }
    }

    actions
}
