//! Conflict report
//!
//! A point-in-time summary for one user: the companies they are currently
//! forbidden to write to, plus their full access history.

use crate::audit::log::AccessLogEntry;
use serde::Serialize;
use std::collections::BTreeSet;

/// Conflict-of-interest report for a single user
///
/// `conflicts` is the union, over every conflict group the user has touched,
/// of that group's companies minus the ones the user already accessed. Both
/// fields are empty for a user with no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub user: String,
    pub conflicts: BTreeSet<String>,
    pub access_history: Vec<AccessLogEntry>,
}

impl ConflictReport {
    /// True when the user has no restrictions and no recorded history
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.access_history.is_empty()
    }
}
