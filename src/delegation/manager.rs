//! Delegation revocation workflow.
//!
//! # Responsibilities
//! - Report balance and nonce of the delegator and the optional sponsor
//! - Build the signed revocation authorization
//! - Submit the type-4 transaction from the paying account and await it
//!
//! # Design Decisions
//! - The sponsor is an explicit `Option<Wallet>`; the sponsored path checks it
//!   before touching the network
//! - Collaborator errors are wrapped into `DelegationError::Transaction` once,
//!   at the point they leave the chain layer
//! - No retries; every failure ends the operation

use alloy::eips::eip7702::SignedAuthorization;
use alloy::primitives::{Address, U256};
use std::time::Duration;

use crate::blockchain::client::{BlockchainClient, ChainRpc};
use crate::blockchain::transaction::build_delegation_tx;
use crate::blockchain::types::{BlockchainError, ChainId};
use crate::blockchain::units::format_balance;
use crate::blockchain::wallet::Wallet;
use crate::blockchain::BlockchainResult;
use crate::config::ValidatedConfig;
use crate::delegation::error::DelegationError;
use crate::delegation::types::{
    AuthorizationOverrides, AuthorizationParams, DelegationResult, RevocationOptions, SignerInfo,
};
use crate::resilience::timeouts::{with_timeout, RECEIPT_TIMEOUT};

const SELF_PAID_CONTEXT: &str = "Failed to revoke delegation";
const SPONSORED_CONTEXT: &str = "Failed to sponsor delegation revocation";

/// Revokes the EIP-7702 delegation of the configured delegator.
pub struct DelegationManager<C> {
    rpc: C,
    config: ValidatedConfig,
    delegator: Wallet,
    sponsor: Option<Wallet>,
    receipt_timeout: Duration,
}

impl DelegationManager<BlockchainClient> {
    /// Connect to the configured JSON-RPC endpoint.
    ///
    /// A chain ID mismatch or an unreachable node is logged, not fatal; the
    /// first real query reports it.
    pub async fn connect(config: ValidatedConfig) -> Result<Self, DelegationError> {
        let client = BlockchainClient::new(config.provider_url(), config.rpc_timeout())
            .map_err(|e| DelegationError::Configuration(e.to_string()))?;

        match client
            .verify_chain_id(ChainId::from(config.chain_id()))
            .await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.provider_url(),
                    chain_id = config.chain_id(),
                    "Connected to RPC endpoint"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Connected but chain verification failed"
                );
            }
        }

        Self::new(config, client)
    }

    /// Load configuration from the environment and connect.
    pub async fn from_env() -> Result<Self, DelegationError> {
        Self::connect(ValidatedConfig::from_env()?).await
    }
}

impl<C: ChainRpc> DelegationManager<C> {
    /// Derive the signers from `config` on top of `rpc`.
    pub fn new(config: ValidatedConfig, rpc: C) -> Result<Self, DelegationError> {
        let chain_id = config.chain_id();
        let delegator = Wallet::from_private_key(config.delegator_private_key(), chain_id)
            .map_err(|e| DelegationError::Configuration(format!("Delegator key: {}", e)))?;
        let sponsor = config
            .sponsor_private_key()
            .map(|key| Wallet::from_private_key(key, chain_id))
            .transpose()
            .map_err(|e| DelegationError::Configuration(format!("Sponsor key: {}", e)))?;

        tracing::info!(
            delegator = %delegator.address(),
            sponsor = ?sponsor.as_ref().map(Wallet::address),
            chain_id = chain_id,
            "Delegation manager initialized"
        );

        Ok(Self {
            rpc,
            config,
            delegator,
            sponsor,
            receipt_timeout: RECEIPT_TIMEOUT,
        })
    }

    /// Override how long to wait for the receipt (60 s by default).
    pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    pub fn rpc(&self) -> &C {
        &self.rpc
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn delegator(&self) -> &Wallet {
        &self.delegator
    }

    pub fn sponsor(&self) -> Option<&Wallet> {
        self.sponsor.as_ref()
    }

    pub fn has_sponsor(&self) -> bool {
        self.sponsor.is_some()
    }

    /// Current balance and nonce of the delegator.
    pub async fn get_delegator_info(&self) -> BlockchainResult<SignerInfo> {
        self.signer_info(self.delegator.address()).await
    }

    /// Current balance and nonce of the sponsor; `None` when no sponsor is
    /// configured.
    pub async fn get_sponsor_info(&self) -> BlockchainResult<Option<SignerInfo>> {
        match &self.sponsor {
            Some(sponsor) => self.signer_info(sponsor.address()).await.map(Some),
            None => Ok(None),
        }
    }

    async fn signer_info(&self, address: Address) -> BlockchainResult<SignerInfo> {
        let balance = self.rpc.get_balance(address).await?;
        let nonce = self.rpc.get_transaction_count(address).await?;
        Ok(SignerInfo {
            address,
            balance: format_balance(balance),
            nonce,
        })
    }

    /// Sign an authorization with the delegator's key.
    ///
    /// Defaults: zero address (revocation), the delegator's current nonce and
    /// the configured chain ID. The chain is only asked for the nonce when it
    /// is not overridden.
    pub async fn create_revocation_authorization(
        &self,
        overrides: AuthorizationOverrides,
    ) -> Result<SignedAuthorization, DelegationError> {
        let wrap = |e: BlockchainError| {
            DelegationError::Authorization(format!(
                "Failed to create revocation authorization: {}",
                e
            ))
        };

        let nonce = match overrides.nonce {
            Some(nonce) => nonce,
            None => self
                .rpc
                .get_transaction_count(self.delegator.address())
                .await
                .map_err(wrap)?,
        };

        let params = AuthorizationParams {
            address: overrides.address.unwrap_or(Address::ZERO),
            nonce,
            chain_id: overrides.chain_id.unwrap_or(self.config.chain_id()),
        };

        let authorization = self
            .delegator
            .sign_authorization(params.address, params.nonce, params.chain_id)
            .await
            .map_err(wrap)?;

        tracing::info!(
            authority = %self.delegator.address(),
            delegate = %params.address,
            nonce = params.nonce,
            chain_id = params.chain_id,
            "Authorization signed"
        );
        Ok(authorization)
    }

    /// Revoke the delegation, paying gas from the delegator.
    pub async fn revoke_delegation(
        &self,
        authorization: Option<SignedAuthorization>,
        options: RevocationOptions,
    ) -> Result<DelegationResult, DelegationError> {
        self.execute(&self.delegator, authorization, options, SELF_PAID_CONTEXT)
            .await
    }

    /// Revoke the delegation, paying gas from the sponsor.
    ///
    /// Fails without any RPC call when no sponsor is configured.
    pub async fn sponsored_revoke_delegation(
        &self,
        authorization: Option<SignedAuthorization>,
        options: RevocationOptions,
    ) -> Result<DelegationResult, DelegationError> {
        let Some(sponsor) = &self.sponsor else {
            return Err(DelegationError::Delegation(
                "Sponsor signer not configured".to_string(),
            ));
        };
        self.execute(sponsor, authorization, options, SPONSORED_CONTEXT)
            .await
    }

    async fn execute(
        &self,
        payer: &Wallet,
        authorization: Option<SignedAuthorization>,
        options: RevocationOptions,
        context: &'static str,
    ) -> Result<DelegationResult, DelegationError> {
        let wrap =
            |e: BlockchainError| DelegationError::transaction(format!("{}: {}", context, e), None);

        self.ensure_balance(payer.address(), options.min_balance(), &wrap)
            .await?;

        let authorization = match authorization {
            Some(authorization) => authorization,
            None => {
                self.create_revocation_authorization(AuthorizationOverrides::default())
                    .await?
            }
        };

        let gas_limit = options.gas_limit.unwrap_or(self.config.gas_limit());
        let tx = build_delegation_tx(
            payer.address(),
            self.delegator.address(),
            authorization,
            gas_limit,
            options.fees(),
        );

        let tx_hash = self.rpc.send_transaction(payer, tx).await.map_err(&wrap)?;

        let receipt = with_timeout(self.receipt_timeout, self.rpc.wait_for_receipt(tx_hash))
            .await
            .map_err(BlockchainError::from)
            .and_then(|waited| waited)
            .map_err(|e| {
                DelegationError::transaction(format!("{}: {}", context, e), Some(tx_hash))
            })?;

        let Some(receipt) = receipt else {
            return Err(DelegationError::transaction(
                "Transaction receipt is null",
                Some(tx_hash),
            ));
        };

        let result = DelegationResult::from(receipt);
        tracing::info!(
            tx_hash = %result.transaction_hash,
            block_number = result.block_number,
            gas_used = %result.gas_used,
            success = result.success,
            "Revocation transaction mined"
        );
        Ok(result)
    }

    async fn ensure_balance<W>(
        &self,
        address: Address,
        required: U256,
        wrap: W,
    ) -> Result<(), DelegationError>
    where
        W: Fn(BlockchainError) -> DelegationError,
    {
        let available = self.rpc.get_balance(address).await.map_err(wrap)?;
        if available < required {
            return Err(DelegationError::InsufficientBalance {
                address,
                required: format_balance(required),
                available: format_balance(available),
            });
        }
        Ok(())
    }
}
