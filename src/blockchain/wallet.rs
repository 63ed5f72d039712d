//! Wallet management and authorization signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - `Debug` shows the address only

use alloy::eips::eip7702::{Authorization, SignedAuthorization};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A local signing key bound to a chain.
#[derive(Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id));

        tracing::debug!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte hash.
    pub async fn sign_hash(&self, hash: B256) -> BlockchainResult<alloy::signers::Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))
    }

    /// Sign an EIP-7702 authorization tuple.
    ///
    /// The result recovers to [`Wallet::address`]; `address` is the delegate
    /// (zero to clear the delegation), `nonce` the authority's account nonce.
    pub async fn sign_authorization(
        &self,
        address: Address,
        nonce: u64,
        chain_id: u64,
    ) -> BlockchainResult<SignedAuthorization> {
        let authorization = Authorization {
            chain_id: U256::from(chain_id),
            address,
            nonce,
        };
        let signature = self.sign_hash(authorization.signature_hash()).await?;
        Ok(authorization.into_signed(signature))
    }

    /// The signer in the form alloy's wallet filler takes.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key", 1);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        let rendered = format!("{:?}", wallet);
        assert!(!rendered.contains(TEST_PRIVATE_KEY));
        assert!(rendered.contains("chain_id"));
    }

    #[tokio::test]
    async fn test_sign_authorization_recovers_to_wallet() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        let signed = wallet
            .sign_authorization(Address::ZERO, 7, 1)
            .await
            .unwrap();

        assert_eq!(signed.address, Address::ZERO);
        assert_eq!(signed.nonce, 7);
        assert_eq!(signed.chain_id, U256::from(1u64));
        assert_eq!(signed.recover_authority().unwrap(), wallet.address());
    }
}
