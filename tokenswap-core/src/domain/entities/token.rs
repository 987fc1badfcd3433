//! Token entity for the swap core

use crate::shared::constants::{
    PLACEHOLDER_TOKEN_DECIMALS, PLACEHOLDER_TOKEN_NAME, PLACEHOLDER_TOKEN_SYMBOL,
    TOKEN_LOGO_BASE_URL, WRAPPED_NATIVE_ADDRESS,
};
use crate::shared::types::Address;
use crate::shared::utils::{normalize_address, same_address};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A fungible token.
///
/// Identity is the lowercase-normalized address: two tokens with the same
/// address are equal regardless of casing or display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
}

impl Token {
    pub fn new(
        address: impl Into<Address>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        let address = address.into();
        Self {
            logo_uri: logo_uri_for(&address),
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
        }
    }

    /// Stand-in for a token whose metadata could not be read from chain
    pub fn placeholder(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
            symbol: PLACEHOLDER_TOKEN_SYMBOL.to_string(),
            name: PLACEHOLDER_TOKEN_NAME.to_string(),
            decimals: PLACEHOLDER_TOKEN_DECIMALS,
            logo_uri: logo_uri_for(WRAPPED_NATIVE_ADDRESS),
        }
    }

    /// Normalized identity key
    pub fn key(&self) -> String {
        normalize_address(&self.address)
    }

    /// Whether this token is the network's wrapped native asset
    pub fn is_native(&self, wrapped_native_address: &str) -> bool {
        same_address(&self.address, wrapped_native_address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        same_address(&self.address, &other.address)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

pub fn logo_uri_for(address: &str) -> String {
    format!("{}/{}/logo.png", TOKEN_LOGO_BASE_URL, address)
}

/// Built-in selectable tokens on Ethereum mainnet
pub fn common_tokens() -> Vec<Token> {
    vec![
        Token::new(WRAPPED_NATIVE_ADDRESS, "WETH", "Wrapped Ether", 18),
        Token::new("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC", "USD Coin", 6),
        Token::new("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI", "Dai Stablecoin", 18),
        Token::new("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", "WBTC", "Wrapped BTC", 8),
        Token::new("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", "UNI", "Uniswap", 18),
    ]
}

/// Look up a built-in token by symbol (case-insensitive)
pub fn find_common_token(symbol: &str) -> Option<Token> {
    common_tokens()
        .into_iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
}
