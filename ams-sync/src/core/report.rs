//! Human-readable reports for the log
//!
//! The action plan is printed before anything is changed, the divergence
//! report after verification. Both are plain text so the daily log file
//! can be read by whoever runs the chapter administration.

use shared::{MemberId, PendingApplication, Person, Roster};
use std::fmt;

use super::divergence::{DivergenceReport, VerificationOutcome};
use super::reconciler::{MemberActions, PendingActions};

/// Member noops above this count are summarized instead of listed
pub const NOOP_DISPLAY_LIMIT: usize = 20;

const INDENT: &str = "        ";

fn write_pending_lines(f: &mut fmt::Formatter<'_>, roster: &Roster<PendingApplication>) -> fmt::Result {
    for (id, application) in roster {
        writeln!(
            f,
            "{INDENT}{} {} {} ({})",
            application.name,
            application.email,
            application.date.date_naive().format("%Y-%m-%d"),
            id
        )?;
    }
    Ok(())
}

fn write_member_line(f: &mut fmt::Formatter<'_>, id: &MemberId, member: &Person) -> fmt::Result {
    writeln!(
        f,
        "{INDENT}{} {} {} ({})",
        member.first_name, member.last_name, member.email, id
    )
}

fn write_member_lines(f: &mut fmt::Formatter<'_>, roster: &Roster<Person>) -> fmt::Result {
    for (id, member) in roster {
        write_member_line(f, id, member)?;
    }
    Ok(())
}

/// Everything the run is about to do, grouped by bucket
pub struct ActionPlanReport<'a> {
    pendings: &'a PendingActions,
    members: &'a MemberActions,
    noop_limit: usize,
}

impl<'a> ActionPlanReport<'a> {
    pub fn new(pendings: &'a PendingActions, members: &'a MemberActions) -> Self {
        Self {
            pendings,
            members,
            noop_limit: NOOP_DISPLAY_LIMIT,
        }
    }

    pub fn with_noop_limit(mut self, noop_limit: usize) -> Self {
        self.noop_limit = noop_limit;
        self
    }
}

impl fmt::Display for ActionPlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pending Applications:")?;
        writeln!(f, "   the following pending applications will be approved:")?;
        write_pending_lines(f, &self.pendings.approve)?;
        writeln!(f, "   the following pending applications will be denied:")?;
        write_pending_lines(f, &self.pendings.deny)?;
        writeln!(f, "   the following pending applications will be invited:")?;
        write_pending_lines(f, &self.pendings.invite)?;
        writeln!(f, "   the following pending applications will be waiting:")?;
        write_pending_lines(f, &self.pendings.noop)?;

        writeln!(f, "Members:")?;
        writeln!(f, "   the following members will be deleted from AMS:")?;
        write_member_lines(f, &self.members.delete)?;
        writeln!(
            f,
            "   for the following members a request will be sent to AMS support (we are not authorized to fix it):"
        )?;
        write_member_lines(f, &self.members.add)?;
        writeln!(f, "   the following locally registered members are in sync with AMS:")?;
        if self.members.noop.len() > self.noop_limit {
            writeln!(f, "   ... {} members, too many to print", self.members.noop.len())?;
        } else {
            write_member_lines(f, &self.members.noop)?;
        }
        Ok(())
    }
}

impl fmt::Display for DivergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_converged() {
            return writeln!(f, "All AMS operations took effect");
        }
        if !self.not_approved.is_empty() {
            writeln!(f, "not approved (still on the pending applications list):")?;
            write_pending_lines(f, &self.not_approved)?;
        }
        if !self.not_denied.is_empty() {
            writeln!(f, "not denied (still on the pending applications list):")?;
            write_pending_lines(f, &self.not_denied)?;
        }
        if !self.not_deleted.is_empty() {
            writeln!(f, "not deleted (still on the members list):")?;
            write_member_lines(f, &self.not_deleted)?;
        }
        Ok(())
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Divergence(report) => write!(f, "{report}"),
            VerificationOutcome::Diagnostic(message) => writeln!(f, "{message}"),
        }
    }
}
