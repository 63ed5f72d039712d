//! Configuration schema definitions.
//!
//! [`DelegationConfig`] is the raw record as supplied (file, environment or
//! code). [`ValidatedConfig`] is what the rest of the crate consumes: checked,
//! defaults applied, never mutated in place.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::validation::validate_config;
use crate::delegation::error::DelegationError;
use crate::resilience::timeouts::DEFAULT_TIMEOUT;

pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_GAS_LIMIT: u64 = 50_000;

/// Raw delegation parameters.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DelegationConfig {
    /// JSON-RPC endpoint URL.
    pub provider_url: String,

    /// Key of the account whose delegation is revoked.
    pub delegator_private_key: String,

    /// Key of the account paying gas; empty or absent means self-paid.
    pub sponsor_private_key: Option<String>,

    /// Chain ID, signed so that out-of-range input can be reported.
    pub chain_id: Option<i64>,

    /// Gas limit of the revocation transaction.
    pub gas_limit: Option<u64>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: Option<u64>,
}

impl DelegationConfig {
    /// The sponsor key, if one was actually given.
    pub fn sponsor_key(&self) -> Option<&str> {
        self.sponsor_private_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn apply(&mut self, updates: ConfigUpdate) {
        if let Some(provider_url) = updates.provider_url {
            self.provider_url = provider_url;
        }
        if let Some(key) = updates.delegator_private_key {
            self.delegator_private_key = key;
        }
        if let Some(key) = updates.sponsor_private_key {
            self.sponsor_private_key = Some(key);
        }
        if let Some(chain_id) = updates.chain_id {
            self.chain_id = Some(chain_id);
        }
        if let Some(gas_limit) = updates.gas_limit {
            self.gas_limit = Some(gas_limit);
        }
        if let Some(secs) = updates.rpc_timeout_secs {
            self.rpc_timeout_secs = Some(secs);
        }
    }
}

impl std::fmt::Debug for DelegationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationConfig")
            .field("provider_url", &self.provider_url)
            .field("delegator_private_key", &"<redacted>")
            .field(
                "sponsor_private_key",
                &self.sponsor_key().map(|_| "<redacted>"),
            )
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .finish()
    }
}

/// Fields to override on an existing configuration. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub provider_url: Option<String>,
    pub delegator_private_key: Option<String>,
    pub sponsor_private_key: Option<String>,
    pub chain_id: Option<i64>,
    pub gas_limit: Option<u64>,
    pub rpc_timeout_secs: Option<u64>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.provider_url.is_none()
            && self.delegator_private_key.is_none()
            && self.sponsor_private_key.is_none()
            && self.chain_id.is_none()
            && self.gas_limit.is_none()
            && self.rpc_timeout_secs.is_none()
    }
}

/// Validated configuration with defaults applied.
#[derive(Clone)]
pub struct ValidatedConfig {
    provider_url: String,
    delegator_private_key: String,
    sponsor_private_key: Option<String>,
    chain_id: u64,
    gas_limit: u64,
    rpc_timeout: Duration,
}

impl ValidatedConfig {
    /// Validate `config` and apply defaults.
    ///
    /// Fails with a configuration error listing every violated rule.
    pub fn new(config: DelegationConfig) -> Result<Self, DelegationError> {
        validate_config(&config).map_err(|errors| DelegationError::from_violations(&errors))?;

        let sponsor_private_key = config.sponsor_key().map(str::to_owned);
        Ok(Self {
            provider_url: config.provider_url.trim().to_owned(),
            delegator_private_key: config.delegator_private_key.trim().to_owned(),
            sponsor_private_key,
            chain_id: config
                .chain_id
                .and_then(|id| u64::try_from(id).ok())
                .unwrap_or(DEFAULT_CHAIN_ID),
            gas_limit: config.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT),
            rpc_timeout: config
                .rpc_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        })
    }

    /// Merge `updates` over this configuration and validate the result.
    ///
    /// `self` is left untouched; the merged snapshot is returned only if it
    /// passes validation.
    pub fn with_updates(&self, updates: ConfigUpdate) -> Result<Self, DelegationError> {
        let mut merged = self.to_raw();
        merged.apply(updates);
        Self::new(merged)
    }

    /// The raw record this snapshot corresponds to.
    pub fn to_raw(&self) -> DelegationConfig {
        DelegationConfig {
            provider_url: self.provider_url.clone(),
            delegator_private_key: self.delegator_private_key.clone(),
            sponsor_private_key: self.sponsor_private_key.clone(),
            chain_id: i64::try_from(self.chain_id).ok(),
            gas_limit: Some(self.gas_limit),
            rpc_timeout_secs: Some(self.rpc_timeout.as_secs()),
        }
    }

    pub fn provider_url(&self) -> &str {
        &self.provider_url
    }

    pub fn delegator_private_key(&self) -> &str {
        &self.delegator_private_key
    }

    pub fn sponsor_private_key(&self) -> Option<&str> {
        self.sponsor_private_key.as_deref()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn rpc_timeout(&self) -> Duration {
        self.rpc_timeout
    }
}

impl std::fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("provider_url", &self.provider_url)
            .field("sponsor_configured", &self.sponsor_private_key.is_some())
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .field("rpc_timeout", &self.rpc_timeout)
            .finish()
    }
}
