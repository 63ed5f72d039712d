//! Configuration validation.
//!
//! # Responsibilities
//! - Check required fields are present
//! - Check keys derive an account and the URL parses
//! - Validate value ranges (chain id > 0, gas limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DelegationConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::blockchain::units::is_valid_private_key;
use crate::config::schema::DelegationConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Provider URL is required")]
    MissingProviderUrl,

    #[error("Invalid provider URL: {0}")]
    InvalidProviderUrl(String),

    #[error("Delegator private key is required")]
    MissingDelegatorKey,

    #[error("Invalid delegator private key format")]
    InvalidDelegatorKey,

    #[error("Invalid sponsor private key format")]
    InvalidSponsorKey,

    #[error("Chain ID must be a positive number")]
    InvalidChainId,

    #[error("Gas limit must be a positive number")]
    InvalidGasLimit,
}

/// Validate a raw config record, collecting every violation.
pub fn validate_config(config: &DelegationConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let provider_url = config.provider_url.trim();
    if provider_url.is_empty() {
        errors.push(ValidationError::MissingProviderUrl);
    } else if let Err(e) = url::Url::parse(provider_url) {
        errors.push(ValidationError::InvalidProviderUrl(e.to_string()));
    }

    if config.delegator_private_key.trim().is_empty() {
        errors.push(ValidationError::MissingDelegatorKey);
    } else if !is_valid_private_key(config.delegator_private_key.trim()) {
        errors.push(ValidationError::InvalidDelegatorKey);
    }

    if let Some(sponsor_key) = config.sponsor_key() {
        if !is_valid_private_key(sponsor_key) {
            errors.push(ValidationError::InvalidSponsorKey);
        }
    }

    if matches!(config.chain_id, Some(id) if id <= 0) {
        errors.push(ValidationError::InvalidChainId);
    }

    if config.gas_limit == Some(0) {
        errors.push(ValidationError::InvalidGasLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
