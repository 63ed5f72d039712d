//! Delegation error taxonomy.
//!
//! Every failure the tool reports falls into one of these kinds. Once a
//! value of this type exists it is propagated as-is; only collaborator
//! errors ([`crate::blockchain::BlockchainError`]) get wrapped, and they are
//! wrapped exactly once.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::config::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DelegationError {
    /// Missing or malformed configuration.
    #[error("{0}")]
    Configuration(String),

    /// The paying account holds less than the reserve.
    #[error("Insufficient balance for address {address}. Required: {required}, Available: {available}")]
    InsufficientBalance {
        address: Address,
        required: String,
        available: String,
    },

    /// Building or signing the authorization failed.
    #[error("{0}")]
    Authorization(String),

    /// Submission or confirmation failed.
    #[error("{message}")]
    Transaction {
        message: String,
        tx_hash: Option<TxHash>,
    },

    /// The API was used in a way the configuration does not support.
    #[error("{0}")]
    Delegation(String),
}

impl DelegationError {
    /// Aggregate every validation failure into one configuration error.
    pub fn from_violations(violations: &[ValidationError]) -> Self {
        let listed = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::Configuration(format!("Configuration validation failed: {}", listed))
    }

    pub fn transaction(message: impl Into<String>, tx_hash: Option<TxHash>) -> Self {
        Self::Transaction {
            message: message.into(),
            tx_hash,
        }
    }

    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::Transaction { .. } => "TRANSACTION_ERROR",
            Self::Delegation(_) => "DELEGATION_ERROR",
        }
    }

    /// Short human name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Configuration Error",
            Self::InsufficientBalance { .. } => "Insufficient Balance",
            Self::Authorization(_) => "Authorization Error",
            Self::Transaction { .. } => "Transaction Error",
            Self::Delegation(_) => "Delegation Error",
        }
    }

    /// What the operator should look at next.
    pub fn remediation_hint(&self) -> &'static str {
        match self {
            Self::Configuration(_) => {
                "Please check your .env file and ensure all required variables are set."
            }
            Self::InsufficientBalance { .. } => "Please add more ETH to your account.",
            Self::Authorization(_) => "Please check your private keys and network configuration.",
            Self::Transaction { .. } => "This might be a gas or network issue.",
            Self::Delegation(_) => "Set SPONSOR_PRIVATE_KEY or use the self-paid revocation.",
        }
    }

    /// Hash of the submitted transaction, when the failure happened after
    /// broadcast.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::Transaction { tx_hash, .. } => *tx_hash,
            _ => None,
        }
    }
}
