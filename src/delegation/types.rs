//! Delegation data model.

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;

use crate::blockchain::transaction::FeeOverrides;
use crate::blockchain::types::ConfirmedReceipt;

/// Reserve the paying account must hold before submitting: 0.001 ether.
pub const MIN_RESERVE_BALANCE: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Point-in-time view of an account. Queried fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignerInfo {
    pub address: Address,
    /// Balance in ether, as a decimal string.
    pub balance: String,
    pub nonce: u64,
}

/// The tuple an authorization signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationParams {
    /// Delegate; the zero address clears the delegation.
    pub address: Address,
    pub nonce: u64,
    pub chain_id: u64,
}

/// Caller overrides for [`AuthorizationParams`]. `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizationOverrides {
    pub address: Option<Address>,
    pub nonce: Option<u64>,
    pub chain_id: Option<u64>,
}

/// Per-call knobs of a revocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevocationOptions {
    /// Overrides the configured gas limit.
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    /// Overrides [`MIN_RESERVE_BALANCE`] (wei).
    pub min_balance: Option<U256>,
}

impl RevocationOptions {
    pub fn fees(&self) -> FeeOverrides {
        FeeOverrides {
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
        }
    }

    pub fn min_balance(&self) -> U256 {
        self.min_balance.unwrap_or(MIN_RESERVE_BALANCE)
    }
}

/// Outcome of a mined revocation transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationResult {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: String,
    /// True iff the receipt status is 1.
    pub success: bool,
}

impl From<ConfirmedReceipt> for DelegationResult {
    fn from(receipt: ConfirmedReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used.to_string(),
            success: receipt.succeeded(),
        }
    }
}
