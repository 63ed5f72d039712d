//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Query chain state (chain id, balances, nonces, receipts)
//! - Submit transactions signed by a given payer
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, ConfirmedReceipt};
use crate::blockchain::wallet::Wallet;
use crate::resilience::timeouts::with_timeout;

/// The chain operations a delegation change needs.
///
/// [`BlockchainClient`] is the JSON-RPC implementation; tests substitute an
/// in-memory chain.
pub trait ChainRpc: Send + Sync {
    /// Chain ID reported by the node.
    fn get_chain_id(&self) -> impl Future<Output = BlockchainResult<ChainId>> + Send;

    /// Balance of `address` in wei.
    fn get_balance(&self, address: Address) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// Transaction count (nonce) of `address`.
    fn get_transaction_count(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Sign `tx` with `payer` and broadcast it.
    fn send_transaction(
        &self,
        payer: &Wallet,
        tx: TransactionRequest,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// Wait until `tx_hash` is mined and fetch its receipt.
    ///
    /// Not bounded by any deadline; callers race it with their own.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<ConfirmedReceipt>>> + Send;
}

/// JSON-RPC client over HTTP.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Read-only provider for queries.
    provider: Arc<dyn Provider + Send + Sync>,
    /// Endpoint, kept to build signing providers per payer.
    rpc_url: url::Url,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made; an unreachable endpoint surfaces on first use.
    pub fn new(rpc_url: &str, timeout_duration: Duration) -> BlockchainResult<Self> {
        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = Arc::new(ProviderBuilder::new().connect_http(rpc_url.clone()))
            as Arc<dyn Provider + Send + Sync>;

        tracing::debug!(rpc_url = %rpc_url, "Blockchain client initialized");

        Ok(Self {
            provider,
            rpc_url,
            timeout_duration,
        })
    }

    /// Verify the connected chain ID matches `expected`.
    pub async fn verify_chain_id(&self, expected: ChainId) -> BlockchainResult<()> {
        let actual = self.get_chain_id().await?;
        if actual != expected {
            return Err(BlockchainError::ChainMismatch {
                expected: expected.into(),
                actual: actual.into(),
            });
        }
        Ok(())
    }
}

impl ChainRpc for BlockchainClient {
    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        let chain_id = with_timeout(self.timeout_duration, self.provider.get_chain_id())
            .await?
            .map_err(|e| BlockchainError::Rpc(format!("Failed to get chain id: {}", e)))?;
        Ok(ChainId(chain_id))
    }

    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        tracing::debug!(address = %address, "Querying balance");
        with_timeout(self.timeout_duration, self.provider.get_balance(address))
            .await?
            .map_err(|e| BlockchainError::Rpc(format!("Failed to get balance: {}", e)))
    }

    async fn get_transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        tracing::debug!(address = %address, "Querying transaction count");
        with_timeout(self.timeout_duration, self.provider.get_transaction_count(address))
            .await?
            .map_err(|e| BlockchainError::Rpc(format!("Failed to get transaction count: {}", e)))
    }

    async fn send_transaction(
        &self,
        payer: &Wallet,
        tx: TransactionRequest,
    ) -> BlockchainResult<TxHash> {
        let signing_provider = ProviderBuilder::new()
            .wallet(payer.ethereum_wallet())
            .connect_http(self.rpc_url.clone());

        let pending = with_timeout(self.timeout_duration, signing_provider.send_transaction(tx))
            .await?
            .map_err(|e| BlockchainError::Rpc(format!("Failed to submit transaction: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, payer = %payer.address(), "Transaction submitted");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ConfirmedReceipt>> {
        let mined = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(1)
            .watch()
            .await
            .map_err(|e| BlockchainError::Rpc(format!("Failed waiting for transaction: {}", e)))?;

        let receipt = with_timeout(
            self.timeout_duration,
            self.provider.get_transaction_receipt(mined),
        )
        .await?
        .map_err(|e| BlockchainError::Rpc(format!("Failed to get receipt: {}", e)))?;

        Ok(receipt.map(ConfirmedReceipt::from))
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
