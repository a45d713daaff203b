//! File-backed AMS session
//!
//! Stands in for the browser-driven AMS session: the remote state is a JSON
//! document with the pending-application queue and the chapter member list.
//! Bulk calls apply to that document the way the AMS applies them to its
//! own lists, and remember what they asked for so `verify` can check the
//! result after the settling delay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{PendingApplication, Person, Roster};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::core::{DivergenceReport, ExpectedOutcome, VerificationOutcome};
use crate::error::{SyncError, SyncResult};
use crate::services::json_store::{load_json, save_json_atomic};
use crate::traits::{MembershipPortal, PortalCredentials, PortalOptions};

/// On-disk shape of the AMS state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSnapshot {
    /// Account allowed to open a session; any account when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default)]
    pub pending_applications: Roster<PendingApplication>,
    #[serde(default)]
    pub members: Roster<Person>,
}

/// AMS session over a snapshot document
pub struct FilePortal {
    path: PathBuf,
    options: PortalOptions,
    settle_delay: Duration,
    snapshot: Mutex<PortalSnapshot>,
    expected: Mutex<ExpectedOutcome>,
}

impl FilePortal {
    /// Open a session: load the snapshot and check the account
    pub async fn connect(
        path: PathBuf,
        credentials: &PortalCredentials,
        options: PortalOptions,
        settle_delay: Duration,
    ) -> SyncResult<Self> {
        let snapshot: PortalSnapshot = load_json(&path)
            .await
            .map_err(|e| SyncError::portal(format!("cannot open AMS state {}: {e}", path.display())))?;

        if let Some(account) = &snapshot.account {
            if account != &credentials.username {
                return Err(SyncError::portal(format!(
                    "login rejected for {}",
                    credentials.username
                )));
            }
        }

        tracing::info!(
            user = %credentials.username,
            mode = if options.headless { "headless" } else { "visible" },
            dry_run = options.dry_run,
            "🔐 AMS session opened"
        );

        Ok(Self {
            path,
            options,
            settle_delay,
            snapshot: Mutex::new(snapshot),
            expected: Mutex::new(ExpectedOutcome::default()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> PortalOptions {
        self.options
    }

    /// What the bulk calls so far asked the AMS to do
    pub async fn expected(&self) -> ExpectedOutcome {
        self.expected.lock().await.clone()
    }

    async fn persist(&self, snapshot: &PortalSnapshot) -> SyncResult<()> {
        save_json_atomic(&self.path, snapshot)
            .await
            .map_err(|e| SyncError::portal(format!("cannot write AMS state {}: {e}", self.path.display())))
    }

    fn skip_for_dry_run(&self, operation: &str, count: usize) -> bool {
        if self.options.dry_run {
            tracing::info!(count, "🧪 Dry run: would {} {} record(s)", operation, count);
        }
        self.options.dry_run
    }
}

#[async_trait]
impl MembershipPortal for FilePortal {
    async fn pending_applications(&self) -> SyncResult<Roster<PendingApplication>> {
        Ok(self.snapshot.lock().await.pending_applications.clone())
    }

    async fn members(&self) -> SyncResult<Roster<Person>> {
        Ok(self.snapshot.lock().await.members.clone())
    }

    async fn approve_pending(&self, applications: &Roster<PendingApplication>) -> SyncResult<()> {
        if self.skip_for_dry_run("approve", applications.len()) {
            return Ok(());
        }

        let mut snapshot = self.snapshot.lock().await;
        for id in applications.keys() {
            match snapshot.pending_applications.remove(id) {
                Some(application) => {
                    snapshot.members.insert(id.clone(), application.to_person());
                }
                None => tracing::warn!(member = %id, "⚠️  Cannot approve: not on the pending applications list"),
            }
        }
        self.persist(&snapshot).await?;
        self.expected.lock().await.record_approved(applications);

        tracing::info!(count = applications.len(), "✅ Approved pending applications");
        Ok(())
    }

    async fn deny_pending(&self, applications: &Roster<PendingApplication>) -> SyncResult<()> {
        if self.skip_for_dry_run("deny", applications.len()) {
            return Ok(());
        }

        let mut snapshot = self.snapshot.lock().await;
        for id in applications.keys() {
            if snapshot.pending_applications.remove(id).is_none() {
                tracing::warn!(member = %id, "⚠️  Cannot deny: not on the pending applications list");
            }
        }
        self.persist(&snapshot).await?;
        self.expected.lock().await.record_denied(applications);

        tracing::info!(count = applications.len(), "🚫 Denied pending applications");
        Ok(())
    }

    async fn delete_members(&self, members: &Roster<Person>) -> SyncResult<()> {
        if self.skip_for_dry_run("delete", members.len()) {
            return Ok(());
        }

        let mut snapshot = self.snapshot.lock().await;
        for id in members.keys() {
            if snapshot.members.remove(id).is_none() {
                tracing::warn!(member = %id, "⚠️  Cannot delete: not on the members list");
            }
        }
        self.persist(&snapshot).await?;
        self.expected.lock().await.record_deleted(members);

        tracing::info!(count = members.len(), "🗑️  Deleted members");
        Ok(())
    }

    async fn verify(&self) -> VerificationOutcome {
        if !self.settle_delay.is_zero() {
            tracing::info!("⏳ Waiting {:?} for AMS to settle", self.settle_delay);
            tokio::time::sleep(self.settle_delay).await;
        }

        let reread: PortalSnapshot = match load_json(&self.path).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                return VerificationOutcome::Diagnostic(format!(
                    "verification could not re-read AMS state {}: {e}",
                    self.path.display()
                ))
            }
        };

        let expected = self.expected.lock().await;
        let report = DivergenceReport::compute(&expected, &reread.pending_applications, &reread.members);
        *self.snapshot.lock().await = reread;

        VerificationOutcome::Divergence(report)
    }
}
