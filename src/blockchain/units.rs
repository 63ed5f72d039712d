//! Native-unit amounts and input format checks.

use alloy::primitives::utils::{format_ether, parse_ether, UnitsError};
use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use std::str::FromStr;

/// Render a wei amount as an ether decimal string ("0.001", "1.0").
pub fn format_balance(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}

/// Parse an ether decimal string into wei.
pub fn parse_balance(ether: &str) -> Result<U256, UnitsError> {
    parse_ether(ether.trim())
}

/// True when `key` derives a signing account.
pub fn is_valid_private_key(key: &str) -> bool {
    let key = key.strip_prefix("0x").unwrap_or(key);
    PrivateKeySigner::from_str(key).is_ok()
}

pub fn is_valid_address(address: &str) -> bool {
    Address::from_str(address).is_ok()
}
