//! Append-only access log
//!
//! Every access attempt that passes input validation is recorded here,
//! whether it was granted or refused. Entries are immutable once appended.

use crate::policy::types::Action;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded access attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessLogEntry {
    /// When the attempt was made
    pub timestamp: DateTime<Utc>,
    /// Requesting user
    pub user: String,
    /// Target company
    pub company: String,
    /// Requested action
    pub action: Action,
    /// Whether access was granted
    pub allowed: bool,
    /// Outcome message; carries the denial reason when refused
    pub reason: String,
}

/// In-memory, append-only log of access attempts
#[derive(Debug, Default)]
pub struct AccessLog {
    entries: Vec<AccessLogEntry>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for an access attempt
    pub fn record(
        &mut self,
        user: &str,
        company: &str,
        action: Action,
        allowed: bool,
        reason: &str,
    ) {
        self.entries.push(AccessLogEntry {
            timestamp: Utc::now(),
            user: user.to_string(),
            company: company.to_string(),
            action,
            allowed,
            reason: reason.to_string(),
        });
    }

    /// All entries, in append order
    pub fn entries(&self) -> &[AccessLogEntry] {
        &self.entries
    }

    /// Entries for one user, in append order
    pub fn entries_for<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a AccessLogEntry> {
        self.entries.iter().filter(move |e| e.user == user)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
