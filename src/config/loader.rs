//! Configuration loading from the environment or disk.
//!
//! Both adapters only produce a raw [`DelegationConfig`]; validation and
//! defaults are applied by [`ValidatedConfig::new`].

use std::fs;
use std::path::Path;

use crate::config::schema::{DelegationConfig, ValidatedConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::delegation::error::DelegationError;

pub const PROVIDER_URL_ENV_VAR: &str = "PROVIDER_URL";
pub const DELEGATOR_KEY_ENV_VAR: &str = "DELEGATOR_PRIVATE_KEY";
pub const SPONSOR_KEY_ENV_VAR: &str = "SPONSOR_PRIVATE_KEY";
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";

impl ValidatedConfig {
    /// Load from `PROVIDER_URL`, `DELEGATOR_PRIVATE_KEY`,
    /// `SPONSOR_PRIVATE_KEY` and `CHAIN_ID`.
    pub fn from_env() -> Result<Self, DelegationError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`ValidatedConfig::from_env`] with a custom variable lookup.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, DelegationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut violations = Vec::new();

        let chain_id = match lookup(CHAIN_ID_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    violations.push(ValidationError::InvalidChainId);
                    None
                }
            },
            None => None,
        };

        let config = DelegationConfig {
            provider_url: lookup(PROVIDER_URL_ENV_VAR).unwrap_or_default(),
            delegator_private_key: lookup(DELEGATOR_KEY_ENV_VAR).unwrap_or_default(),
            sponsor_private_key: lookup(SPONSOR_KEY_ENV_VAR),
            chain_id,
            ..Default::default()
        };

        if let Err(errors) = validate_config(&config) {
            violations.extend(errors);
        }
        if !violations.is_empty() {
            return Err(DelegationError::from_violations(&violations));
        }

        Self::new(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DelegationError> {
        Self::new(load_config(path)?)
    }
}

/// Read a raw configuration record from a TOML file.
pub fn load_config(path: &Path) -> Result<DelegationConfig, DelegationError> {
    let content = fs::read_to_string(path).map_err(|e| {
        DelegationError::Configuration(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        DelegationError::Configuration(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}
