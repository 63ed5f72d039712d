//! EIP-7702 delegation revocation.
//!
//! Signs an authorization that points the delegator's account back at the
//! zero address and submits it in a type-4 transaction, paid either by the
//! delegator or by a separate sponsor account.
//!
//! # Architecture Overview
//!
//! ```text
//!   env / .env / TOML ──▶ config ──▶ delegation::DelegationManager
//!                                        │
//!                       ┌────────────────┼────────────────┐
//!                       ▼                ▼                ▼
//!                  account info    authorization      executor
//!                                        │                │
//!                                        ▼                ▼
//!                                 blockchain::Wallet  blockchain::ChainRpc
//!                                                     (alloy JSON-RPC)
//!
//!   Cross-cutting: resilience (timeouts), observability (tracing),
//!                  lifecycle (signals)
//! ```

pub mod blockchain;
pub mod config;
pub mod delegation;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::{DelegationConfig, ValidatedConfig};
pub use delegation::{DelegationError, DelegationManager, DelegationResult};
