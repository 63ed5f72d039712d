//! Shared utilities for integration testing.

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use eip7702_revoke::blockchain::{
    BlockchainError, BlockchainResult, ChainId, ChainRpc, ConfirmedReceipt, Wallet,
};
use eip7702_revoke::config::{DelegationConfig, ValidatedConfig};

// Anvil's first two dev accounts.
#[allow(dead_code)]
pub const DELEGATOR_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
#[allow(dead_code)]
pub const SPONSOR_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

#[allow(dead_code)]
pub const ONE_ETH: u128 = 1_000_000_000_000_000_000;

#[allow(dead_code)]
pub fn config(sponsor: Option<&str>) -> ValidatedConfig {
    config_on_chain(sponsor, 1)
}

#[allow(dead_code)]
pub fn config_on_chain(sponsor: Option<&str>, chain_id: i64) -> ValidatedConfig {
    ValidatedConfig::new(DelegationConfig {
        provider_url: "http://localhost:8545".to_string(),
        delegator_private_key: DELEGATOR_KEY.to_string(),
        sponsor_private_key: sponsor.map(str::to_string),
        chain_id: Some(chain_id),
        ..Default::default()
    })
    .unwrap()
}

#[allow(dead_code)]
pub fn address_of(key: &str) -> Address {
    Wallet::from_private_key(key, 1).unwrap().address()
}

/// What `wait_for_receipt` does.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum ReceiptBehavior {
    Mined { status: u64 },
    Missing,
    Fail(String),
    Hang,
}

/// One broadcast transaction and the account that signed it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub payer: Address,
    pub tx: TransactionRequest,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// In-memory chain that records every call.
pub struct MockChain {
    balances: Mutex<HashMap<Address, U256>>,
    nonces: Mutex<HashMap<Address, u64>>,
    receipt: Mutex<ReceiptBehavior>,
    fail_nonce: AtomicBool,
    calls: AtomicUsize,
    nonce_queries: AtomicUsize,
    submissions: Mutex<Vec<Submission>>,
    wait_dropped: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockChain {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            nonces: Mutex::new(HashMap::new()),
            receipt: Mutex::new(ReceiptBehavior::Mined { status: 1 }),
            fail_nonce: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            nonce_queries: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            wait_dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_balance(self, address: Address, wei: u128) -> Self {
        self.balances.lock().unwrap().insert(address, U256::from(wei));
        self
    }

    pub fn with_nonce(self, address: Address, nonce: u64) -> Self {
        self.nonces.lock().unwrap().insert(address, nonce);
        self
    }

    pub fn with_receipt(self, behavior: ReceiptBehavior) -> Self {
        *self.receipt.lock().unwrap() = behavior;
        self
    }

    pub fn with_failing_nonce(self) -> Self {
        self.fail_nonce.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn nonce_queries(&self) -> usize {
        self.nonce_queries.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn receipt_wait_dropped(&self) -> bool {
        self.wait_dropped.load(Ordering::SeqCst)
    }
}

impl ChainRpc for MockChain {
    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChainId(1))
    }

    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let balance = self.balances.lock().unwrap().get(&address).copied();
        Ok(balance.unwrap_or_default())
    }

    async fn get_transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.nonce_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_nonce.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("nonce unavailable".to_string()));
        }
        let nonce = self.nonces.lock().unwrap().get(&address).copied();
        Ok(nonce.unwrap_or_default())
    }

    async fn send_transaction(
        &self,
        payer: &Wallet,
        tx: TransactionRequest,
    ) -> BlockchainResult<TxHash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(Submission {
            payer: payer.address(),
            tx,
        });
        Ok(TxHash::repeat_byte(submissions.len() as u8))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ConfirmedReceipt>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.receipt.lock().unwrap().clone();
        match behavior {
            ReceiptBehavior::Mined { status } => Ok(Some(ConfirmedReceipt {
                transaction_hash: tx_hash,
                block_number: 19_000_000,
                gas_used: 36_800,
                status,
            })),
            ReceiptBehavior::Missing => Ok(None),
            ReceiptBehavior::Fail(message) => Err(BlockchainError::Rpc(message)),
            ReceiptBehavior::Hang => {
                let _flag = DropFlag(self.wait_dropped.clone());
                std::future::pending().await
            }
        }
    }
}
