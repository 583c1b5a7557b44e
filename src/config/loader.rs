//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (CHWALL_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "chwall.toml",
    ".chwall.toml",
    "~/.config/chwall/config.toml",
    "/etc/chwall/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults are handled by serde defaults on AppConfig.

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with CHWALL_ prefix
    // e.g., CHWALL_POLICY__ENFORCE_REGISTRY, CHWALL_LOGGING__LEVEL
    // Double underscore (__) maps to nested keys (policy.enforce_registry)
    builder = builder.add_source(
        Environment::with_prefix("CHWALL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
///
/// Overlapping groups are legal (a company may compete in two classes);
/// empty names or empty groups are not.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.policy.groups.is_empty() {
        return Err(ConfigError::Missing {
            field: "policy.groups".to_string(),
        });
    }

    for (name, companies) in &config.policy.groups {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "conflict group names must be non-empty".to_string(),
            });
        }
        if companies.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("conflict group '{}' has no companies", name),
            });
        }
        for company in companies {
            if company.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("conflict group '{}' contains an empty company name", name),
                });
            }
        }
    }

    Ok(())
}
