//! EIP-7702 transaction construction.
//!
//! # Responsibilities
//! - Build the set-code transaction that carries one authorization
//! - Apply caller gas/fee overrides; leave the rest to the provider fillers

use alloy::eips::eip7702::SignedAuthorization;
use alloy::network::{TransactionBuilder, TransactionBuilder7702};
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;

/// EIP-2718 type byte of a set-code transaction.
pub const EIP7702_TX_TYPE: u8 = 4;

/// Fee caps in wei. Unset fields are estimated by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeOverrides {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

/// Build a zero-value type-4 transaction from `payer` to `authority` whose
/// authorization list holds exactly `authorization`.
///
/// The nonce and chain id are filled at submission time from the paying
/// account.
pub fn build_delegation_tx(
    payer: Address,
    authority: Address,
    authorization: SignedAuthorization,
    gas_limit: u64,
    fees: FeeOverrides,
) -> TransactionRequest {
    let mut tx = TransactionRequest::default()
        .transaction_type(EIP7702_TX_TYPE)
        .with_from(payer)
        .with_to(authority)
        .with_value(U256::ZERO)
        .with_gas_limit(gas_limit)
        .with_authorization_list(vec![authorization]);

    if let Some(max_fee) = fees.max_fee_per_gas {
        tx.set_max_fee_per_gas(max_fee);
    }
    if let Some(priority_fee) = fees.max_priority_fee_per_gas {
        tx.set_max_priority_fee_per_gas(priority_fee);
    }

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::eips::eip7702::Authorization;
    use alloy::primitives::{address, Signature, TxKind};

    fn placeholder_auth() -> SignedAuthorization {
        Authorization {
            chain_id: U256::from(1u64),
            address: Address::ZERO,
            nonce: 3,
        }
        .into_signed(Signature::new(U256::from(1u64), U256::from(2u64), false))
    }

    #[test]
    fn test_build_self_paid() {
        let authority = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let tx = build_delegation_tx(
            authority,
            authority,
            placeholder_auth(),
            50_000,
            FeeOverrides::default(),
        );

        assert_eq!(tx.transaction_type, Some(EIP7702_TX_TYPE));
        assert_eq!(tx.from, Some(authority));
        assert_eq!(tx.to, Some(TxKind::Call(authority)));
        assert_eq!(tx.value, Some(U256::ZERO));
        assert_eq!(tx.gas, Some(50_000));
        assert_eq!(tx.authorization_list.as_ref().map(Vec::len), Some(1));
        assert_eq!(tx.max_fee_per_gas, None);
        assert_eq!(tx.max_priority_fee_per_gas, None);
    }

    #[test]
    fn test_build_with_fee_overrides() {
        let authority = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let sponsor = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let tx = build_delegation_tx(
            sponsor,
            authority,
            placeholder_auth(),
            80_000,
            FeeOverrides {
                max_fee_per_gas: Some(30_000_000_000),
                max_priority_fee_per_gas: Some(1_000_000_000),
            },
        );

        assert_eq!(tx.from, Some(sponsor));
        assert_eq!(tx.to, Some(TxKind::Call(authority)));
        assert_eq!(tx.max_fee_per_gas, Some(30_000_000_000));
        assert_eq!(tx.max_priority_fee_per_gas, Some(1_000_000_000));
    }
}
