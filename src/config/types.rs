//! Configuration types for chwall
//!
//! The configuration structure loaded from TOML files and/or environment
//! variables.

use crate::policy::ConflictGroup;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Conflict-of-interest policy settings
    pub policy: PolicyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Conflict-of-interest policy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Conflict groups: group name -> member companies
    pub groups: BTreeMap<String, BTreeSet<String>>,

    /// Refuse access to companies outside the registry
    pub enforce_registry: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        // The classic Brewer-Nash demonstration data set.
        let mut groups = BTreeMap::new();
        groups.insert(
            "Bank".to_string(),
            [
                "Citibank".to_string(),
                "Bank of America".to_string(),
                "Bank of the West".to_string(),
            ]
            .into_iter()
            .collect(),
        );
        groups.insert(
            "Gasoline".to_string(),
            [
                "Shell".to_string(),
                "Mobil".to_string(),
                "Sunoco".to_string(),
                "Texaco".to_string(),
            ]
            .into_iter()
            .collect(),
        );

        Self {
            groups,
            enforce_registry: true,
        }
    }
}

impl PolicyConfig {
    /// Materialize the configured groups in name order
    pub fn conflict_groups(&self) -> Vec<ConflictGroup> {
        self.groups
            .iter()
            .map(|(name, companies)| ConflictGroup::new(name.clone(), companies.iter().cloned()))
            .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
