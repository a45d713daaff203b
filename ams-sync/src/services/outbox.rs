//! Outgoing mail spooled to a directory
//!
//! Each message becomes one RFC 822 style text file. A separate mail
//! transfer agent (or a person) picks them up from there.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::error::{SyncError, SyncResult};

/// A single message waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// Headers plus body, CRLF line endings
    pub fn render(&self) -> String {
        let mut message = String::new();
        message.push_str(&format!("From: {}\r\n", self.from));
        message.push_str(&format!("To: {}\r\n", self.to));
        message.push_str(&format!("Subject: {}\r\n", self.subject));
        message.push_str(&format!("Date: {}\r\n", Utc::now().to_rfc2822()));
        message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        message.push_str("\r\n");
        for line in self.body.lines() {
            message.push_str(line);
            message.push_str("\r\n");
        }
        message
    }
}

/// Directory-backed mail spool
pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the message into the spool and return its path
    pub async fn deliver(&self, mail: &OutgoingMail) -> SyncResult<PathBuf> {
        if mail.to.trim().is_empty() {
            return Err(SyncError::mail(format!("no recipient for '{}'", mail.subject)));
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SyncError::mail(format!("cannot create outbox {}: {e}", self.dir.display())))?;

        let file_name = format!(
            "{}-{}.eml",
            Utc::now().format("%Y%m%dT%H%M%S"),
            Uuid::new_v4().simple()
        );
        let path = self.dir.join(file_name);
        fs::write(&path, mail.render())
            .await
            .map_err(|e| SyncError::mail(format!("cannot write {}: {e}", path.display())))?;

        tracing::debug!(to = %mail.to, path = %path.display(), "📨 Spooled mail");
        Ok(path)
    }
}
