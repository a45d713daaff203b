//! File-backed local membership registry
//!
//! The registry is a single JSON document maintained by the chapter's own
//! administration:
//!
//! ```json
//! {
//!   "members":         { "<id>": { "first_name": "..", "last_name": "..", "email": ".." } },
//!   "applications":    { "<id>": { ... } },
//!   "in_negotiations": { "<id>": { ... } },
//!   "last_invite_date": "2024-05-01T00:00:00Z"
//! }
//! ```
//!
//! Invitations and support requests are spooled to the outbox. Sending an
//! invitation moves `last_invite_date` forward and rewrites the document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{MemberId, PendingApplication, Person, Roster};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::LocalRosters;
use crate::error::{SyncError, SyncResult};
use crate::services::json_store::{load_json, save_json_atomic};
use crate::services::outbox::{OutgoingMail, Outbox};
use crate::traits::{LocalRegistry, PortalCredentials};

/// On-disk shape of the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub members: Roster<Person>,
    #[serde(default)]
    pub applications: Roster<Person>,
    #[serde(default)]
    pub in_negotiations: Roster<Person>,
    pub last_invite_date: DateTime<Utc>,
}

impl RegistryDocument {
    fn to_rosters(&self) -> LocalRosters {
        LocalRosters {
            members: self.members.clone(),
            applications: self.applications.clone(),
            in_negotiations: self.in_negotiations.clone(),
            last_invite_date: self.last_invite_date,
        }
    }
}

/// Mail addresses used by the registry
#[derive(Debug, Clone)]
pub struct RegistryMail {
    pub from: String,
    pub ams_support: String,
}

/// Registry backed by a JSON document plus a mail outbox
pub struct FileRegistry {
    path: PathBuf,
    credentials: PortalCredentials,
    mail: RegistryMail,
    outbox: Outbox,
    document: Mutex<RegistryDocument>,
}

impl FileRegistry {
    /// Load the registry document from disk
    pub async fn open(
        path: PathBuf,
        credentials: PortalCredentials,
        mail: RegistryMail,
        outbox: Outbox,
    ) -> SyncResult<Self> {
        let document: RegistryDocument = load_json(&path)
            .await
            .map_err(|e| SyncError::registry(format!("cannot load {}: {e}", path.display())))?;

        tracing::debug!(
            members = document.members.len(),
            applications = document.applications.len(),
            in_negotiations = document.in_negotiations.len(),
            "📂 Loaded local registry from {}",
            path.display()
        );

        Ok(Self {
            path,
            credentials,
            mail,
            outbox,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn invitation_for(&self, id: &MemberId, application: &PendingApplication) -> OutgoingMail {
        OutgoingMail {
            from: self.mail.from.clone(),
            to: application.email.clone(),
            subject: "Your chapter membership application".to_string(),
            body: format!(
                "Dear {name},\n\n\
                 thank you for applying for chapter membership on the ISOC.ORG membership system.\n\
                 To complete your application please fill in our chapter membership form and\n\
                 reply to this mail. Until then your application stays pending.\n\n\
                 Membership id: {id}\n",
                name = application.name,
            ),
        }
    }

    fn support_request_for(&self, members: &Roster<Person>) -> OutgoingMail {
        let mut body = String::from(
            "Hello AMS support,\n\n\
             the following people are registered members of our chapter but are not\n\
             listed as chapter members in AMS. Please add them:\n\n",
        );
        for (id, member) in members {
            body.push_str(&format!("    {} <{}> ({})\n", member.full_name(), member.email, id));
        }
        body.push_str("\nThank you!\n");

        OutgoingMail {
            from: self.mail.from.clone(),
            to: self.mail.ams_support.clone(),
            subject: format!("Please add {} chapter member(s) to AMS", members.len()),
            body,
        }
    }
}

#[async_trait]
impl LocalRegistry for FileRegistry {
    async fn rosters(&self) -> SyncResult<LocalRosters> {
        Ok(self.document.lock().await.to_rosters())
    }

    fn credentials(&self) -> PortalCredentials {
        self.credentials.clone()
    }

    /// Spools the invitation, then persists the advanced cutoff.
    ///
    /// When persisting fails the mail is already out and the cutoff stays
    /// where it was, both on disk and in memory, so the applicant is invited
    /// again on the next run.
    async fn invite(&self, id: &MemberId, application: &PendingApplication) -> SyncResult<()> {
        let mail = self.invitation_for(id, application);
        self.outbox.deliver(&mail).await?;

        let mut document = self.document.lock().await;
        let mut updated = document.clone();
        updated.last_invite_date = updated.last_invite_date.max(Utc::now());
        save_json_atomic(&self.path, &updated).await?;
        *document = updated;

        tracing::info!(member = %id, email = %application.email, "✉️  Invitation sent");
        Ok(())
    }

    async fn notify_support(&self, members: &Roster<Person>) -> SyncResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mail = self.support_request_for(members);
        self.outbox.deliver(&mail).await?;

        tracing::info!(count = members.len(), to = %self.mail.ams_support, "✉️  Support request sent");
        Ok(())
    }
}
