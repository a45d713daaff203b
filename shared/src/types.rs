//! Core roster types shared by the reconciler and its adapters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Global run ID singleton - set once at startup
static RUN_ID: OnceLock<RunId> = OnceLock::new();

/// Membership-system identifier (primary key across every roster)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    /// Create a member ID, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> SharedResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(SharedError::InvalidMemberId { input: id });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MemberId {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberId> for String {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person known to either side, as a member or applicant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Only present for local applicants who filled in a form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            date: None,
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }
}

/// An application outstanding on the remote system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingApplication {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

impl PendingApplication {
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date,
        }
    }

    /// Member record the remote system creates when this application is approved.
    /// The display name is split at the first whitespace.
    pub fn to_person(&self) -> Person {
        let name = self.name.trim();
        let (first, last) = match name.split_once(char::is_whitespace) {
            Some((first, last)) => (first, last.trim()),
            None => (name, ""),
        };
        Person::new(first, last, self.email.clone())
    }
}

/// Identifier-keyed snapshot of one side's records.
///
/// Ordered so reports come out the same way on every run.
pub type Roster<T> = BTreeMap<MemberId, T>;

/// Identifier for one reconciliation run, attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Initialize the global run ID
    pub fn init() -> &'static RunId {
        RUN_ID.get_or_init(RunId::new)
    }

    /// Get the global run ID, initializing it on first use
    pub fn current() -> &'static RunId {
        Self::init()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The short form is enough to tell runs apart within one day's log
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}
