//! Core policy types
//!
//! The request/response vocabulary shared by the wall model and its callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The kind of access being requested
///
/// A closed enum rather than an action string: an unknown action is
/// unrepresentable past the input parser, so the model has no
/// "unrecognized action" failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a company's data
    Read,
    /// Modify a company's data
    Write,
}

impl Action {
    /// Get the action name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
        }
    }

    /// Try to parse an action from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Action::Read),
            "write" => Some(Action::Write),
            _ => None,
        }
    }

    /// Check if this action modifies data
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Action::Write)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a policy check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed
    Allowed,
    /// Access is denied with a reason
    Denied(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }

    /// The denial reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Denied(reason) => Some(reason),
        }
    }
}

/// Result of an access attempt through [`access_company`]
///
/// [`access_company`]: crate::policy::WallPolicy::access_company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Whether the access was granted
    pub allowed: bool,
    /// Human-readable result, including the denial reason when refused
    pub message: String,
}

impl AccessOutcome {
    pub fn granted(message: impl Into<String>) -> Self {
        Self {
            allowed: true,
            message: message.into(),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: message.into(),
        }
    }
}

/// A named conflict-of-interest group
///
/// Companies in the same group are mutual competitors: accessing one bars
/// future writes to the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictGroup {
    /// Group name, e.g. "Bank"
    pub name: String,
    /// Member company names
    pub companies: BTreeSet<String>,
}

impl ConflictGroup {
    pub fn new(name: impl Into<String>, companies: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            companies: companies.into_iter().collect(),
        }
    }

    /// Check whether a company belongs to this group
    pub fn contains(&self, company: &str) -> bool {
        self.companies.contains(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip() {
        for action in [Action::Read, Action::Write] {
            let parsed = Action::try_parse(action.as_str()).unwrap();
            assert_eq!(action, parsed);
        }
    }

    #[test]
    fn test_action_rejects_unknown() {
        assert_eq!(Action::try_parse("delete"), None);
        assert_eq!(Action::try_parse(""), None);
        assert_eq!(Action::try_parse("READ"), None);
    }

    #[test]
    fn test_action_mutating() {
        assert!(!Action::Read.is_mutating());
        assert!(Action::Write.is_mutating());
    }

    #[test]
    fn test_decision_reason() {
        assert_eq!(AccessDecision::Allowed.reason(), None);
        let denied = AccessDecision::Denied("conflict".to_string());
        assert_eq!(denied.reason(), Some("conflict"));
        assert!(denied.is_denied());
    }

    #[test]
    fn test_group_contains() {
        let group = ConflictGroup::new("Bank", ["Citibank".to_string(), "Mizuho".to_string()]);
        assert!(group.contains("Citibank"));
        assert!(!group.contains("Shell"));
    }
}
