//! Reconciliation cycle driver
//!
//! Takes one snapshot of both sides, classifies every record, reports the
//! plan, applies it and finally asks the AMS session to verify that the
//! bulk actions took effect. This is the only place with side effects; the
//! registry and the AMS session are injected and passed explicitly.

use shared::{logging, run_debug, run_info, run_warn, RunId};

use crate::core::{
    reconcile_members, reconcile_pendings, ActionPlanReport, MemberActions, PendingActions, VerificationOutcome,
};
use crate::error::SyncResult;
use crate::traits::{LocalRegistry, MembershipPortal};

/// Whether a cycle may change anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Apply the plan and verify it
    Live,
    /// Compute and report the plan only
    DryRun,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Live
        }
    }
}

/// Classification of both categories for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub pendings: PendingActions,
    pub members: MemberActions,
}

/// Everything a cycle decided and observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub plan: ReconciliationPlan,
    /// `None` for dry runs
    pub verification: Option<VerificationOutcome>,
}

impl CycleOutcome {
    /// A dry run never converges; there was nothing to check
    pub fn is_converged(&self) -> bool {
        self.verification.as_ref().is_some_and(VerificationOutcome::is_converged)
    }
}

/// Drives one reconciliation cycle
pub struct Orchestrator<R, P>
where
    R: LocalRegistry,
    P: MembershipPortal,
{
    registry: R,
    portal: P,
}

impl<R, P> Orchestrator<R, P>
where
    R: LocalRegistry,
    P: MembershipPortal,
{
    /// Create new orchestrator with injected dependencies
    pub fn new(registry: R, portal: P) -> Self {
        Self { registry, portal }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Snapshot both sides once and classify every record
    pub async fn plan(&self) -> SyncResult<ReconciliationPlan> {
        let local = self.registry.rosters().await?;
        let remote_pending = self.portal.pending_applications().await?;
        let remote_members = self.portal.members().await?;

        run_debug!(
            RunId::current(),
            "📥 Local: {} members, {} applications, {} in negotiation; AMS: {} pending, {} members",
            local.members.len(),
            local.applications.len(),
            local.in_negotiations.len(),
            remote_pending.len(),
            remote_members.len()
        );

        let plan = ReconciliationPlan {
            pendings: reconcile_pendings(&remote_pending, &local),
            members: reconcile_members(&remote_members, &local.members, &remote_pending),
        };
        run_info!(
            RunId::current(),
            "🧮 Pending: {}; members: {}",
            plan.pendings.summary(),
            plan.members.summary()
        );
        Ok(plan)
    }

    /// Issue every corrective action in the plan
    pub async fn apply(&self, plan: &ReconciliationPlan) -> SyncResult<()> {
        let run_id = RunId::current();

        if !plan.pendings.approve.is_empty() {
            let details = format!("{} pending application(s)", plan.pendings.approve.len());
            logging::log_progress(run_id, "Approving", &details);
            self.portal.approve_pending(&plan.pendings.approve).await?;
        }

        if !plan.pendings.deny.is_empty() {
            let details = format!("{} pending application(s)", plan.pendings.deny.len());
            logging::log_progress(run_id, "Denying", &details);
            self.portal.deny_pending(&plan.pendings.deny).await?;
        }

        if !plan.members.delete.is_empty() {
            let details = format!("{} AMS member(s)", plan.members.delete.len());
            logging::log_progress(run_id, "Deleting", &details);
            self.portal.delete_members(&plan.members.delete).await?;
        }

        for (id, application) in &plan.pendings.invite {
            self.registry.invite(id, application).await?;
        }

        if !plan.members.add.is_empty() {
            let details = format!("{} member(s) from AMS support", plan.members.add.len());
            logging::log_progress(run_id, "Requesting", &details);
            self.registry.notify_support(&plan.members.add).await?;
        }

        Ok(())
    }

    /// Run plan, report, apply and verify
    pub async fn run_cycle(&self, mode: RunMode) -> SyncResult<CycleOutcome> {
        let run_id = RunId::current();

        let plan = self.plan().await?;
        logging::log_block(run_id, &ActionPlanReport::new(&plan.pendings, &plan.members).to_string());

        if mode == RunMode::DryRun {
            run_info!(run_id, "🧪 Dry run: no actions issued, verification skipped");
            return Ok(CycleOutcome {
                plan,
                verification: None,
            });
        }

        self.apply(&plan).await?;

        let verification = self.portal.verify().await;
        match &verification {
            VerificationOutcome::Divergence(report) if report.is_converged() => {
                logging::log_success(run_id, "All AMS operations took effect");
            }
            VerificationOutcome::Divergence(report) => {
                run_warn!(run_id, "⚠️  {} AMS action(s) did not take effect:", report.len());
                logging::log_block(run_id, &report.to_string());
            }
            VerificationOutcome::Diagnostic(message) => {
                run_warn!(run_id, "⚠️  Verification incomplete");
                logging::log_block(run_id, message);
            }
        }

        Ok(CycleOutcome {
            plan,
            verification: Some(verification),
        })
    }
}
