//! Swap configuration
//!
//! Every contract-boundary constant lives here and is injected into the
//! quoting and execution components at construction.

use crate::shared::constants::*;
use crate::shared::error::SwapError;
use crate::shared::types::SwapResult;
use crate::shared::utils::validate_ethereum_address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub router_address: String,
    pub wrapped_native_address: String,
    pub slippage_bps: u32,
    pub fee_multiplier: Decimal,
    pub deadline_offset_secs: u64,
    pub success_reset_delay_ms: u64,
    pub price_feed_url: String,
    pub price_platform: String,
    pub rpc_timeout_ms: u64,
    pub confirmation_timeout_ms: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            router_address: DEFAULT_ROUTER_ADDRESS.to_string(),
            wrapped_native_address: WRAPPED_NATIVE_ADDRESS.to_string(),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            fee_multiplier: DEFAULT_FEE_MULTIPLIER,
            deadline_offset_secs: DEFAULT_DEADLINE_OFFSET_SECS,
            success_reset_delay_ms: SUCCESS_RESET_DELAY_MS,
            price_feed_url: DEFAULT_PRICE_FEED_URL.to_string(),
            price_platform: DEFAULT_PRICE_PLATFORM.to_string(),
            rpc_timeout_ms: RPC_TIMEOUT,
            confirmation_timeout_ms: TRANSACTION_CONFIRMATION_TIMEOUT,
        }
    }
}

impl SwapConfig {
    /// Load configuration from `.env` and `TOKENSWAP_*` environment variables
    pub fn from_env() -> SwapResult<Self> {
        dotenv::dotenv().ok(); // Load .env if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> SwapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            lookup(key).filter(|value| !value.is_empty()).unwrap_or(fallback)
        };

        let config = Self {
            chain_id: parse_var(&lookup, "TOKENSWAP_CHAIN_ID", defaults.chain_id)?,
            rpc_url: text("TOKENSWAP_RPC_URL", defaults.rpc_url),
            router_address: text("TOKENSWAP_ROUTER_ADDRESS", defaults.router_address),
            wrapped_native_address: text("TOKENSWAP_WRAPPED_NATIVE_ADDRESS", defaults.wrapped_native_address),
            slippage_bps: parse_var(&lookup, "TOKENSWAP_SLIPPAGE_BPS", defaults.slippage_bps)?,
            fee_multiplier: parse_var(&lookup, "TOKENSWAP_FEE_MULTIPLIER", defaults.fee_multiplier)?,
            deadline_offset_secs: parse_var(&lookup, "TOKENSWAP_DEADLINE_OFFSET_SECS", defaults.deadline_offset_secs)?,
            success_reset_delay_ms: parse_var(&lookup, "TOKENSWAP_SUCCESS_RESET_DELAY_MS", defaults.success_reset_delay_ms)?,
            price_feed_url: text("TOKENSWAP_PRICE_FEED_URL", defaults.price_feed_url),
            price_platform: text("TOKENSWAP_PRICE_PLATFORM", defaults.price_platform),
            rpc_timeout_ms: parse_var(&lookup, "TOKENSWAP_RPC_TIMEOUT_MS", defaults.rpc_timeout_ms)?,
            confirmation_timeout_ms: parse_var(&lookup, "TOKENSWAP_CONFIRMATION_TIMEOUT_MS", defaults.confirmation_timeout_ms)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SwapResult<()> {
        validate_ethereum_address(&self.router_address)
            .map_err(|e| SwapError::config(format!("Invalid router address '{}': {}", self.router_address, e)))?;
        validate_ethereum_address(&self.wrapped_native_address)
            .map_err(|e| SwapError::config(format!("Invalid wrapped native address '{}': {}", self.wrapped_native_address, e)))?;

        if self.slippage_bps >= BASIS_POINTS_DENOMINATOR {
            return Err(SwapError::config(format!(
                "Slippage tolerance must be below {} basis points, got {}",
                BASIS_POINTS_DENOMINATOR, self.slippage_bps
            )));
        }
        if self.fee_multiplier <= Decimal::ZERO || self.fee_multiplier > Decimal::ONE {
            return Err(SwapError::config(format!(
                "Fee multiplier must be in (0, 1], got {}",
                self.fee_multiplier
            )));
        }
        if self.rpc_timeout_ms == 0 || self.confirmation_timeout_ms == 0 {
            return Err(SwapError::config("Timeouts must be greater than zero"));
        }
        if self.rpc_url.is_empty() {
            return Err(SwapError::config("RPC URL is required"));
        }

        Ok(())
    }

    /// Multiplier applied to a quoted output to get the minimum acceptable output
    pub fn slippage_multiplier(&self) -> Decimal {
        let denominator = Decimal::from(BASIS_POINTS_DENOMINATOR);
        (denominator - Decimal::from(self.slippage_bps)) / denominator
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub fn success_reset_delay(&self) -> Duration {
        Duration::from_millis(self.success_reset_delay_ms)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, fallback: T) -> SwapResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| SwapError::config(format!("Invalid value for {}: '{}' ({})", key, value, e))),
        None => Ok(fallback),
    }
}
