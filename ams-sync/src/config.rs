//! Environment-based configuration
//!
//! ## Configuration Sources
//! Settings are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Required
//! - `AMS_USERNAME`, `AMS_PASSWORD`: AMS login
//! - `CHAPTER_REGISTRY_PATH`: local registry JSON document
//! - `AMS_SNAPSHOT_PATH`: AMS state JSON document
//!
//! ## Optional
//! - `CHAPTER_OUTBOX_DIR` (default `./outbox`)
//! - `CHAPTER_MAIL_FROM` (default `membership@localhost`)
//! - `AMS_SUPPORT_EMAIL` (default `amshelp@isoc.org`)
//! - `AMS_SETTLE_SECONDS` (default 10)
//! - `AMS_SYNC_LOG_DIR` (default `$HOME/isoc-ams-logs`)
//! - `AMS_SYNC_LOG_LEVEL` (default `info`)

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};
use crate::traits::PortalCredentials;

pub const DEFAULT_AMS_SUPPORT: &str = "amshelp@isoc.org";
pub const DEFAULT_MAIL_FROM: &str = "membership@localhost";
pub const DEFAULT_OUTBOX_DIR: &str = "./outbox";
pub const DEFAULT_SETTLE_SECONDS: u64 = 10;

/// Everything the binary needs to wire up one run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub credentials: PortalCredentials,
    pub registry_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub outbox_dir: PathBuf,
    pub mail_from: String,
    pub ams_support: String,
    pub settle_delay: Duration,
    /// `None` when no log directory can be derived (no `$HOME`)
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl SyncConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> SyncResult<Self> {
        // Silently ignored when there is no .env file
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut missing_required = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing_required.push(key);
                String::new()
            })
        };

        let username = required("AMS_USERNAME");
        let password = required("AMS_PASSWORD");
        let registry_path = required("CHAPTER_REGISTRY_PATH");
        let snapshot_path = required("AMS_SNAPSHOT_PATH");

        if !missing_required.is_empty() {
            return Err(SyncError::config(format!(
                "Missing required settings: {}",
                missing_required.join(", ")
            )));
        }

        let settle_delay = match get("AMS_SETTLE_SECONDS") {
            Some(raw) => {
                let seconds = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| SyncError::config(format!("AMS_SETTLE_SECONDS is not a number of seconds: {raw}")))?;
                Duration::from_secs(seconds)
            }
            None => Duration::from_secs(DEFAULT_SETTLE_SECONDS),
        };

        let log_dir = get("AMS_SYNC_LOG_DIR")
            .map(PathBuf::from)
            .or_else(|| get("HOME").map(|home| shared::logging::default_log_dir(&PathBuf::from(home))));

        Ok(Self {
            credentials: PortalCredentials::new(username, password),
            registry_path: PathBuf::from(registry_path),
            snapshot_path: PathBuf::from(snapshot_path),
            outbox_dir: PathBuf::from(get("CHAPTER_OUTBOX_DIR").unwrap_or_else(|| DEFAULT_OUTBOX_DIR.to_string())),
            mail_from: get("CHAPTER_MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            ams_support: get("AMS_SUPPORT_EMAIL").unwrap_or_else(|| DEFAULT_AMS_SUPPORT.to_string()),
            settle_delay,
            log_dir,
            log_level: get("AMS_SYNC_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
