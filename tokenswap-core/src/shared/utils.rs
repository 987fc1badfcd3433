//! Utility functions for the swap core
//!
//! Address validation and the conversions between human decimal amounts and
//! on-chain smallest-unit integers.

use crate::shared::constants::ADDRESS_LENGTH;
use crate::shared::error::SwapError;
use ethers::types::{Address as ChainAddress, U256};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest scale a `Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}

/// Validate Ethereum address format (`0x` + 40 hex characters)
pub fn validate_ethereum_address(address: &str) -> Result<(), SwapError> {
    if !address.starts_with("0x") {
        return Err(SwapError::validation("Address must start with 0x"));
    }

    if address.len() != ADDRESS_LENGTH {
        return Err(SwapError::validation("Address must be 42 characters long"));
    }

    // Check if all characters after 0x are valid hex
    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SwapError::validation("Address contains invalid hex characters"));
    }

    Ok(())
}

/// Validate and parse an address into its 20-byte form
pub fn parse_address(address: &str) -> Result<ChainAddress, SwapError> {
    validate_ethereum_address(address)?;
    ChainAddress::from_str(address)
        .map_err(|e| SwapError::validation(format!("Invalid address {}: {}", address, e)))
}

/// Lowercase identity form of an address
pub fn normalize_address(address: &str) -> String {
    address.to_ascii_lowercase()
}

pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Parse a human amount, returning it only when strictly positive
pub fn parse_positive_amount(amount: &str) -> Option<Decimal> {
    let amount = amount.trim();
    if amount.is_empty() || amount.contains('_') {
        return None;
    }
    Decimal::from_str(amount)
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

/// Convert a human decimal amount into the token's smallest unit.
///
/// Fails instead of truncating when `amount` carries more significant
/// fractional digits than `decimals` allows. Trailing zeros are ignored.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, SwapError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(SwapError::validation("Amount cannot be empty"));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(SwapError::validation("Invalid amount format"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(SwapError::validation("Invalid amount format"));
    }
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(SwapError::validation(format!(
            "Amount has {} decimal places but the token supports {}",
            fraction.len(),
            decimals
        )));
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    digits.push_str(fraction);
    for _ in fraction.len()..decimals as usize {
        digits.push('0');
    }

    U256::from_dec_str(&digits)
        .map_err(|e| SwapError::validation(format!("Amount out of range: {}", e)))
}

/// Format a smallest-unit integer as a human decimal amount
pub fn from_base_units(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    if digits.len() <= decimals {
        let mut formatted = "0.".to_string();
        for _ in 0..(decimals - digits.len()) {
            formatted.push('0');
        }
        formatted.push_str(&digits);
        formatted
    } else {
        let mut formatted = digits;
        let decimal_pos = formatted.len() - decimals;
        formatted.insert(decimal_pos, '.');
        formatted
    }
}

/// Render `value` with exactly `places` fractional digits, rounding half away from zero
pub fn format_fixed(value: Decimal, places: u32) -> String {
    format_fixed_with(value, places, RoundingStrategy::MidpointAwayFromZero)
}

/// Render `value` with exactly `places` fractional digits.
///
/// Digits past `Decimal`'s 28-digit scale are zero padded.
pub fn format_fixed_with(value: Decimal, places: u32, strategy: RoundingStrategy) -> String {
    let rounded = value.round_dp_with_strategy(places.min(MAX_DECIMAL_SCALE), strategy);
    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    if places == 0 {
        return whole.to_string();
    }

    let mut formatted = String::with_capacity(whole.len() + 1 + places as usize);
    formatted.push_str(whole);
    formatted.push('.');
    formatted.push_str(fraction);
    for _ in fraction.len()..places as usize {
        formatted.push('0');
    }
    formatted
}
