//! Chinese Wall decision logic
//!
//! Implements the Brewer–Nash conflict-of-interest rules:
//! 1. Anyone may read any known company's data.
//! 2. A user's first access establishes a "side" — the set of conflict
//!    groups their accessed companies belong to.
//! 3. Writes to any company inside a touched group are denied for the rest
//!    of the session; writes outside every touched group stay allowed.
//!
//! All state transitions funnel through [`WallPolicy::access_company`]; the
//! `can_read`/`can_write` checks are pure predicates.

use crate::audit::{AccessLog, AccessLogEntry, ConflictReport};
use crate::config::PolicyConfig;
use crate::policy::registry::CompanyRegistry;
use crate::policy::types::{AccessDecision, AccessOutcome, Action, ConflictGroup};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// The access-control model
///
/// Owns the conflict groups (fixed at construction), the per-user accessed
/// company sets (grow monotonically, never shrink within a session), and the
/// append-only access log. State lives for the process lifetime only.
pub struct WallPolicy {
    registry: CompanyRegistry,
    /// When set, requests for companies outside the registry are refused.
    enforce_registry: bool,
    user_access: HashMap<String, BTreeSet<String>>,
    log: AccessLog,
}

impl WallPolicy {
    /// Create a policy over the given conflict groups
    pub fn new(groups: Vec<ConflictGroup>, enforce_registry: bool) -> Self {
        Self {
            registry: CompanyRegistry::new(groups),
            enforce_registry,
            user_access: HashMap::new(),
            log: AccessLog::new(),
        }
    }

    /// Create a policy from configuration
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.conflict_groups(), config.enforce_registry)
    }

    /// The compiled company registry
    pub fn registry(&self) -> &CompanyRegistry {
        &self.registry
    }

    /// Sorted view of every known company name
    pub fn valid_companies(&self) -> BTreeSet<&str> {
        self.registry.companies()
    }

    /// Companies the user has successfully accessed so far
    pub fn accessed_companies(&self, user: &str) -> Option<&BTreeSet<String>> {
        self.user_access.get(user)
    }

    /// Check whether `user` may read `company`
    ///
    /// Reads are unconditional for known companies; the wall constrains
    /// writes only. Pure predicate, no side effects.
    pub fn can_read(&self, user: &str, company: &str) -> AccessDecision {
        debug!(user, company, "Checking read access");
        if let Some(denied) = self.check_registry(company) {
            return denied;
        }
        AccessDecision::Allowed
    }

    /// Check whether `user` may write to `company`
    ///
    /// Denies when the company belongs to any conflict group the user has
    /// already touched. Pure predicate, no side effects.
    pub fn can_write(&self, user: &str, company: &str) -> AccessDecision {
        debug!(user, company, "Checking write access");
        if let Some(denied) = self.check_registry(company) {
            return denied;
        }

        // First-touch rule: the wall only engages once the user has a side.
        let Some(accessed) = self.user_access.get(user) else {
            return AccessDecision::Allowed;
        };
        if accessed.is_empty() {
            return AccessDecision::Allowed;
        }

        for group in self.registry.groups_containing(company) {
            if Self::touches(group, accessed) {
                debug!(user, company, group = %group.name, "Write conflict");
                return AccessDecision::Denied(format!(
                    "conflict of interest: a company in group '{}' was already accessed",
                    group.name
                ));
            }
        }

        AccessDecision::Allowed
    }

    /// Attempt an access, recording the result
    ///
    /// The only mutating entry point. On success the company joins the
    /// user's accessed set and a success entry is logged; on denial the set
    /// is left unchanged and a failure entry carries the reason. Empty user
    /// or company fails before anything is logged.
    pub fn access_company(&mut self, user: &str, company: &str, action: Action) -> AccessOutcome {
        if user.is_empty() || company.is_empty() {
            return AccessOutcome::refused("User and company must be specified");
        }

        let decision = match action {
            Action::Read => self.can_read(user, company),
            Action::Write => self.can_write(user, company),
        };

        let outcome = match decision {
            AccessDecision::Allowed => {
                self.user_access
                    .entry(user.to_string())
                    .or_default()
                    .insert(company.to_string());
                let message = match action {
                    Action::Read => format!(
                        "{user} read {company}. \
                         You can now attempt to write, but be aware of potential conflicts."
                    ),
                    Action::Write => format!(
                        "{user} wrote to {company}. \
                         You may be restricted from writing to competing companies now."
                    ),
                };
                AccessOutcome::granted(message)
            }
            AccessDecision::Denied(reason) => {
                let verb = match action {
                    Action::Read => "read",
                    Action::Write => "write to",
                };
                AccessOutcome::refused(format!(
                    "Access denied: {user} cannot {verb} {company}: {reason}"
                ))
            }
        };

        self.log
            .record(user, company, action, outcome.allowed, &outcome.message);
        outcome
    }

    /// Chronological log entries for a user; empty if the user is unknown
    pub fn user_access_history(&self, user: &str) -> Vec<AccessLogEntry> {
        self.log.entries_for(user).cloned().collect()
    }

    /// Build the conflict report for a user
    ///
    /// `conflicts` is the union over every touched group of that group's
    /// companies minus the companies the user already accessed — exactly the
    /// set the user is now forbidden to write to. Idempotent between
    /// `access_company` calls.
    pub fn conflict_report(&self, user: &str) -> ConflictReport {
        let mut conflicts = BTreeSet::new();
        if let Some(accessed) = self.user_access.get(user) {
            for group in self.registry.groups() {
                if Self::touches(group, accessed) {
                    for company in &group.companies {
                        if !accessed.contains(company) {
                            conflicts.insert(company.clone());
                        }
                    }
                }
            }
        }

        ConflictReport {
            user: user.to_string(),
            conflicts,
            access_history: self.user_access_history(user),
        }
    }

    /// The full access log, in append order
    pub fn access_log(&self) -> &AccessLog {
        &self.log
    }

    fn check_registry(&self, company: &str) -> Option<AccessDecision> {
        if self.enforce_registry && !self.registry.is_known(company) {
            return Some(AccessDecision::Denied(format!(
                "Invalid company: '{company}' is not a known company"
            )));
        }
        None
    }

    fn touches(group: &ConflictGroup, accessed: &BTreeSet<String>) -> bool {
        group.companies.iter().any(|c| accessed.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_policy() -> WallPolicy {
        WallPolicy::new(
            vec![
                ConflictGroup::new(
                    "Bank",
                    [
                        "Citibank".to_string(),
                        "Bank of America".to_string(),
                        "Bank of the West".to_string(),
                    ],
                ),
                ConflictGroup::new(
                    "Gasoline",
                    [
                        "Shell".to_string(),
                        "Mobil".to_string(),
                        "Sunoco".to_string(),
                        "Texaco".to_string(),
                    ],
                ),
            ],
            true,
        )
    }

    #[test]
    fn test_first_touch_always_allowed() {
        let policy = sample_policy();
        assert!(policy.can_read("Alice", "Citibank").is_allowed());
        assert!(policy.can_write("Alice", "Citibank").is_allowed());
    }

    #[test]
    fn test_write_denied_in_touched_group() {
        let mut policy = sample_policy();
        assert!(policy.access_company("Alice", "Citibank", Action::Write).allowed);

        let decision = policy.can_write("Alice", "Bank of America");
        assert!(decision.is_denied());
        assert!(decision.reason().unwrap().contains("Bank"));
    }

    #[test]
    fn test_write_allowed_in_disjoint_group() {
        let mut policy = sample_policy();
        assert!(policy.access_company("Bob", "Shell", Action::Read).allowed);
        assert!(policy.can_write("Bob", "Citibank").is_allowed());
        assert!(policy.access_company("Bob", "Citibank", Action::Write).allowed);
    }

    #[test]
    fn test_repeat_write_to_same_company_denied() {
        // The intersection rule is literal: once the group is touched, every
        // company in it is write-denied, including the one already accessed.
        let mut policy = sample_policy();
        assert!(policy.access_company("Alice", "Citibank", Action::Write).allowed);
        assert!(policy.can_write("Alice", "Citibank").is_denied());
    }

    #[test]
    fn test_read_stays_allowed_after_side_chosen() {
        let mut policy = sample_policy();
        assert!(policy.access_company("Alice", "Citibank", Action::Write).allowed);
        assert!(policy.can_read("Alice", "Bank of America").is_allowed());
    }

    #[test]
    fn test_unknown_company_denied_when_enforced() {
        let policy = sample_policy();
        let decision = policy.can_read("Carol", "Nonexistent Corp");
        assert!(decision.is_denied());
        assert!(decision.reason().unwrap().contains("Invalid company"));
        assert!(policy.can_write("Carol", "Nonexistent Corp").is_denied());
    }

    #[test]
    fn test_unknown_company_allowed_without_enforcement() {
        let mut policy = WallPolicy::new(
            vec![ConflictGroup::new("Bank", ["Citibank".to_string()])],
            false,
        );
        assert!(policy.can_read("Carol", "Nonexistent Corp").is_allowed());
        let outcome = policy.access_company("Carol", "Nonexistent Corp", Action::Read);
        assert!(outcome.allowed);
        // An accessed company outside every group restricts nothing.
        assert!(policy.can_write("Carol", "Citibank").is_allowed());
    }

    #[test]
    fn test_empty_input_rejected_without_logging() {
        let mut policy = sample_policy();
        let outcome = policy.access_company("", "Shell", Action::Read);
        assert!(!outcome.allowed);
        assert_eq!(outcome.message, "User and company must be specified");
        assert!(policy.access_log().is_empty());

        let outcome = policy.access_company("Alice", "", Action::Write);
        assert!(!outcome.allowed);
        assert!(policy.access_log().is_empty());
        assert!(policy.accessed_companies("Alice").is_none());
    }

    #[test]
    fn test_denied_write_does_not_mutate() {
        let mut policy = sample_policy();
        policy.access_company("Alice", "Citibank", Action::Write);
        let before = policy.accessed_companies("Alice").unwrap().clone();

        let outcome = policy.access_company("Alice", "Bank of America", Action::Write);
        assert!(!outcome.allowed);
        assert_eq!(policy.accessed_companies("Alice").unwrap(), &before);
        // The denial is logged all the same.
        assert_eq!(policy.user_access_history("Alice").len(), 2);
    }

    #[test]
    fn test_conflict_report_contents() {
        let mut policy = sample_policy();
        policy.access_company("Alice", "Citibank", Action::Write);

        let report = policy.conflict_report("Alice");
        let conflicts: Vec<&str> = report.conflicts.iter().map(String::as_str).collect();
        assert_eq!(conflicts, vec!["Bank of America", "Bank of the West"]);
        assert_eq!(report.access_history.len(), 1);
        assert!(report.access_history[0].allowed);
    }

    #[test]
    fn test_conflict_report_empty_for_unknown_user() {
        let policy = sample_policy();
        let report = policy.conflict_report("Nobody");
        assert!(report.conflicts.is_empty());
        assert!(report.access_history.is_empty());
    }

    #[test]
    fn test_conflict_report_idempotent() {
        let mut policy = sample_policy();
        policy.access_company("Alice", "Citibank", Action::Write);
        policy.access_company("Alice", "Shell", Action::Read);

        let first = policy.conflict_report("Alice");
        let second = policy.conflict_report("Alice");
        assert_eq!(first, second);
    }

    #[test]
    fn test_history_is_chronological_per_user() {
        let mut policy = sample_policy();
        policy.access_company("Alice", "Citibank", Action::Read);
        policy.access_company("Bob", "Shell", Action::Read);
        policy.access_company("Alice", "Bank of America", Action::Write);

        let history = policy.user_access_history("Alice");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].company, "Citibank");
        assert_eq!(history[1].company, "Bank of America");
        assert!(!history[1].allowed);
        assert_eq!(policy.user_access_history("Bob").len(), 1);
    }
}
