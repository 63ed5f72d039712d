//! Delegation revocation subsystem.
//!
//! # Data Flow
//! ```text
//! ValidatedConfig
//!     → manager.rs (signers derived: delegator, optional sponsor)
//!     → account info (balance/nonce snapshots)
//!     → authorization (zero address, current nonce, chain id; signed by delegator)
//!     → executor (reserve check → type-4 tx from payer to delegator → receipt)
//!     → DelegationResult
//! ```

pub mod error;
pub mod manager;
pub mod types;

pub use error::DelegationError;
pub use manager::DelegationManager;
pub use types::{
    AuthorizationOverrides, AuthorizationParams, DelegationResult, RevocationOptions, SignerInfo,
    MIN_RESERVE_BALANCE,
};
