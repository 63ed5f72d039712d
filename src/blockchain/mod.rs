//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Validated config (private keys, RPC URL)
//!     → wallet.rs (key loading, authorization signing)
//!     → transaction.rs (EIP-7702 request with one authorization)
//!     → client.rs (RPC with timeouts: query, broadcast, await receipt)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC queries have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{BlockchainClient, ChainRpc};
pub use transaction::{build_delegation_tx, FeeOverrides, EIP7702_TX_TYPE};
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmedReceipt};
pub use units::{format_balance, is_valid_address, is_valid_private_key, parse_balance};
pub use wallet::Wallet;
