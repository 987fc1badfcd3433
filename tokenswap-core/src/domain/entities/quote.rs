//! Quote entity

use super::token::Token;
use crate::shared::types::Amount;
use crate::shared::utils::{format_fixed, parse_positive_amount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Both reference prices came from the price feed
    Oracle,
    /// Simulated rate from the fallback model
    Fallback,
}

/// An ephemeral price quote. Recomputed on every input change, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub from_token: Token,
    pub to_token: Token,
    pub from_amount: Amount,
    pub to_amount: Amount,
    pub source: QuoteSource,
}

impl Quote {
    /// Units of `to_token` per unit of `from_token`, six decimals
    pub fn rate(&self) -> Option<String> {
        let from = parse_positive_amount(&self.from_amount)?;
        let to = parse_positive_amount(&self.to_amount)?;
        to.checked_div(from).map(|rate| format_fixed(rate, 6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::find_common_token;

    fn quote(from_amount: &str, to_amount: &str) -> Quote {
        Quote {
            from_token: find_common_token("WETH").expect("WETH"),
            to_token: find_common_token("USDC").expect("USDC"),
            from_amount: from_amount.to_string(),
            to_amount: to_amount.to_string(),
            source: QuoteSource::Oracle,
        }
    }

    #[test]
    fn test_quote_rate() {
        assert_eq!(quote("2", "5952.000000000").rate().as_deref(), Some("2976.000000"));
        assert_eq!(quote("0", "1").rate(), None);
    }

    #[test]
    fn test_quote_source_serialization() {
        let json = serde_json::to_string(&QuoteSource::Fallback).expect("Failed to serialize");
        assert_eq!(json, "\"fallback\"");
    }
}
