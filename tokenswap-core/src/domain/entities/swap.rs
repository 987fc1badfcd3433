//! Swap request, variant and outcome

use super::quote::Quote;
use super::token::Token;
use crate::shared::error::SwapError;
use crate::shared::types::{Address, SwapResult};
use ethers::types::{TxHash, U256};
use serde::{Deserialize, Serialize};

/// Everything needed to build one exchange transaction.
/// Lives only for the duration of a single swap attempt.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub id: String,
    pub wallet_address: Address,
    pub from_token: Token,
    pub to_token: Token,
    pub from_amount: String,
    pub amount_in: U256,
    pub min_amount_out: U256,
    /// Unix seconds
    pub deadline: u64,
}

impl SwapRequest {
    pub fn path(&self) -> [&str; 2] {
        [&self.from_token.address, &self.to_token.address]
    }
}

/// Router entry point used for a swap
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwapVariant {
    /// `swapExactETHForTokens`, amount in attached as value
    NativeIn,
    /// `swapExactTokensForETH`
    NativeOut,
    /// `swapExactTokensForTokens`
    TokenToToken,
}

impl SwapVariant {
    pub fn select(from_native: bool, to_native: bool) -> Self {
        if from_native {
            Self::NativeIn
        } else if to_native {
            Self::NativeOut
        } else {
            Self::TokenToToken
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            Self::NativeIn => "swapExactETHForTokens",
            Self::NativeOut => "swapExactTokensForETH",
            Self::TokenToToken => "swapExactTokensForTokens",
        }
    }
}

/// What a confirmed swap leaves behind
#[derive(Debug, Clone)]
pub struct SwapReceipt {
    pub request_id: String,
    pub transaction_hash: TxHash,
    pub approval_hash: Option<TxHash>,
    pub variant: SwapVariant,
    pub amount_in: U256,
    pub min_amount_out: U256,
    pub deadline: u64,
    pub quote: Quote,
}

/// Terminal result of a swap attempt
#[derive(Debug, Clone)]
pub enum SwapOutcome {
    Confirmed(SwapReceipt),
    Failed(SwapError),
}

impl SwapOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

impl From<SwapResult<SwapReceipt>> for SwapOutcome {
    fn from(result: SwapResult<SwapReceipt>) -> Self {
        match result {
            Ok(receipt) => Self::Confirmed(receipt),
            Err(error) => Self::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selection() {
        assert_eq!(SwapVariant::select(true, false), SwapVariant::NativeIn);
        assert_eq!(SwapVariant::select(false, true), SwapVariant::NativeOut);
        assert_eq!(SwapVariant::select(false, false), SwapVariant::TokenToToken);
        // Native in takes precedence
        assert_eq!(SwapVariant::select(true, true), SwapVariant::NativeIn);
    }

    #[test]
    fn test_variant_method_names() {
        assert_eq!(SwapVariant::NativeIn.method_name(), "swapExactETHForTokens");
        assert_eq!(SwapVariant::NativeOut.method_name(), "swapExactTokensForETH");
        assert_eq!(SwapVariant::TokenToToken.method_name(), "swapExactTokensForTokens");
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome = SwapOutcome::from(Err(SwapError::execution("reverted")));
        assert!(!outcome.is_success());
    }
}
