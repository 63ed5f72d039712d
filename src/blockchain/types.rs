//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionReceipt;
use thiserror::Error;

use crate::resilience::TimeoutError;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request or receipt wait exceeded its deadline.
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// The parts of a mined transaction's receipt this tool reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedReceipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    /// 1 on success, 0 on revert.
    pub status: u64,
}

impl ConfirmedReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

impl From<TransactionReceipt> for ConfirmedReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used,
            status: u64::from(receipt.status()),
        }
    }
}
