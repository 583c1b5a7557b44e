//! Company registry
//!
//! Lookup structures compiled once from the configured conflict groups.
//! The registry is the union of every group's companies; it validates that
//! a referenced company is known and answers which groups contain it.
//! Disjointness of groups is not enforced — a company listed in several
//! groups belongs to all of them.

use crate::policy::types::ConflictGroup;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Compiled view of the conflict groups
#[derive(Debug, Clone)]
pub struct CompanyRegistry {
    groups: Vec<ConflictGroup>,
    /// company name -> indices into `groups`
    membership: HashMap<String, Vec<usize>>,
}

impl CompanyRegistry {
    /// Build a registry from conflict groups
    ///
    /// Logs a warning for each company that appears in more than one group.
    pub fn new(groups: Vec<ConflictGroup>) -> Self {
        let mut membership: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for company in &group.companies {
                membership.entry(company.clone()).or_default().push(idx);
            }
        }

        for (company, indices) in &membership {
            if indices.len() > 1 {
                let names: Vec<&str> = indices.iter().map(|i| groups[*i].name.as_str()).collect();
                warn!(company = %company, groups = ?names, "Company appears in multiple conflict groups");
            }
        }

        Self { groups, membership }
    }

    /// Check whether a company is known to any group
    pub fn is_known(&self, company: &str) -> bool {
        self.membership.contains_key(company)
    }

    /// All groups that contain the given company
    pub fn groups_containing(&self, company: &str) -> impl Iterator<Item = &ConflictGroup> {
        self.membership
            .get(company)
            .into_iter()
            .flatten()
            .map(|idx| &self.groups[*idx])
    }

    /// All configured groups
    pub fn groups(&self) -> &[ConflictGroup] {
        &self.groups
    }

    /// Sorted union of every group's companies
    pub fn companies(&self) -> BTreeSet<&str> {
        self.membership.keys().map(String::as_str).collect()
    }

    /// Number of distinct companies
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }
}
