//! Custom token metadata resolution
//!
//! Reads `name`, `symbol` and `decimals` from a token contract. Tokens that
//! fail to resolve degrade to a placeholder instead of an error, but carry
//! `MetadataSource::Placeholder` so callers can warn or retry.

use crate::core::transactions::abi::ContractAbi;
use crate::domain::entities::Token;
use crate::domain::repositories::WalletProvider;
use crate::shared::error::SwapError;
use crate::shared::types::{ContractCall, SwapResult};
use crate::shared::utils::{normalize_address, parse_address};
use ethers::abi::Token as AbiToken;
use ethers::types::{Address as ChainAddress, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSource {
    Chain,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub token: Token,
    pub source: MetadataSource,
}

impl ResolvedToken {
    /// Metadata was read from the contract
    pub fn is_resolved(&self) -> bool {
        self.source == MetadataSource::Chain
    }
}

/// Session-scoped token resolver. The cache is never evicted.
pub struct TokenMetadataResolver {
    provider: Arc<dyn WalletProvider>,
    abi: ContractAbi,
    cache: RwLock<HashMap<String, ResolvedToken>>,
}

impl TokenMetadataResolver {
    pub fn new(provider: Arc<dyn WalletProvider>) -> SwapResult<Self> {
        Ok(Self {
            provider,
            abi: ContractAbi::load()?,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Resolve a token address, reusing an earlier result for the same address.
    ///
    /// A malformed address is a validation error and makes no chain call.
    pub async fn resolve(&self, address: &str) -> SwapResult<ResolvedToken> {
        let contract = parse_address(address)?;

        if let Some(cached) = self.cache.read().await.get(&normalize_address(address)) {
            return Ok(cached.clone());
        }

        Ok(self.load(address, contract).await)
    }

    /// Resolve again even if a result is cached, e.g. to retry a placeholder
    pub async fn refresh(&self, address: &str) -> SwapResult<ResolvedToken> {
        let contract = parse_address(address)?;
        Ok(self.load(address, contract).await)
    }

    /// Every token resolved during this session
    pub async fn known_tokens(&self) -> Vec<Token> {
        self.cache
            .read()
            .await
            .values()
            .map(|resolved| resolved.token.clone())
            .collect()
    }

    async fn load(&self, address: &str, contract: ChainAddress) -> ResolvedToken {
        let resolved = match self.read_metadata(contract).await {
            Ok((name, symbol, decimals)) => {
                log::info!("Resolved token {} ({}) with {} decimals", symbol, address, decimals);
                ResolvedToken {
                    token: Token::new(address, symbol, name, decimals),
                    source: MetadataSource::Chain,
                }
            }
            Err(e) => {
                log::warn!("Could not read metadata for token {}: {}", address, e);
                ResolvedToken {
                    token: Token::placeholder(address),
                    source: MetadataSource::Placeholder,
                }
            }
        };

        self.cache
            .write()
            .await
            .insert(normalize_address(address), resolved.clone());
        resolved
    }

    async fn read_metadata(&self, contract: ChainAddress) -> SwapResult<(String, String, u8)> {
        let (name, symbol, decimals) = tokio::try_join!(
            self.call(contract, "name"),
            self.call(contract, "symbol"),
            self.call(contract, "decimals"),
        )?;

        Ok((as_string(name)?, as_string(symbol)?, as_decimals(decimals)?))
    }

    async fn call(&self, contract: ChainAddress, function: &str) -> SwapResult<AbiToken> {
        let data = self.abi.encode_erc20(function, &[])?;
        let output = self.provider.read(ContractCall::new(contract, data)).await?;
        self.abi
            .decode_erc20(function, &output)?
            .into_iter()
            .next()
            .ok_or_else(|| SwapError::contract(format!("Empty {} response", function)))
    }
}

fn as_string(value: AbiToken) -> SwapResult<String> {
    value
        .into_string()
        .ok_or_else(|| SwapError::contract("Expected a string"))
}

fn as_decimals(value: AbiToken) -> SwapResult<u8> {
    let value = value
        .into_uint()
        .ok_or_else(|| SwapError::contract("Expected an integer"))?;
    if value > U256::from(u8::MAX) {
        return Err(SwapError::contract(format!("Decimals out of range: {}", value)));
    }
    Ok(value.low_u32() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockWalletProvider;
    use crate::testing::FakeChain;

    const TOKEN: &str = "0x514910771AF9Ca656af840dff83E8264EcF986CA";
    const NOT_A_TOKEN: &str = "0x0000000000000000000000000000000000000001";

    fn resolver(chain: &Arc<FakeChain>) -> TokenMetadataResolver {
        TokenMetadataResolver::new(chain.clone()).expect("resolver")
    }

    #[tokio::test]
    async fn test_malformed_address_makes_no_call() {
        // No expectations: any chain call would panic
        let provider = MockWalletProvider::new();
        let resolver = TokenMetadataResolver::new(Arc::new(provider)).expect("resolver");

        for address in ["not-an-address", "0x123", "0xZZ4910771AF9Ca656af840dff83E8264EcF986CA"] {
            let result = resolver.resolve(address).await;
            assert!(matches!(result, Err(SwapError::Validation(_))), "{}", address);
        }
        assert!(resolver.known_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_resolves_metadata_from_chain() {
        let chain = Arc::new(FakeChain::new().with_token(TOKEN, "LINK", "ChainLink Token", 18));
        let resolved = resolver(&chain).resolve(TOKEN).await.expect("resolve");

        assert!(resolved.is_resolved());
        assert_eq!(resolved.token.symbol, "LINK");
        assert_eq!(resolved.token.name, "ChainLink Token");
        assert_eq!(resolved.token.decimals, 18);
        assert_eq!(resolved.token.address, TOKEN);
        assert_eq!(chain.reads().len(), 3);
    }

    #[tokio::test]
    async fn test_non_token_degrades_to_placeholder() {
        let chain = Arc::new(FakeChain::new());
        let resolved = resolver(&chain).resolve(NOT_A_TOKEN).await.expect("resolve");

        assert!(!resolved.is_resolved());
        assert_eq!(resolved.token.name, "Unknown Token");
        assert_eq!(resolved.token.symbol, "UNKNOWN");
        assert_eq!(resolved.token.decimals, 18);
        assert_eq!(resolved.token.address, NOT_A_TOKEN);
    }

    #[tokio::test]
    async fn test_rpc_failure_degrades_to_placeholder() {
        let chain = Arc::new(FakeChain::new().with_token(TOKEN, "LINK", "ChainLink Token", 18).failing_reads());
        let resolved = resolver(&chain).resolve(TOKEN).await.expect("resolve");
        assert_eq!(resolved.source, MetadataSource::Placeholder);
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_cached() {
        let chain = Arc::new(FakeChain::new().with_token(TOKEN, "LINK", "ChainLink Token", 18));
        let resolver = resolver(&chain);

        resolver.resolve(TOKEN).await.expect("resolve");
        resolver.resolve(&TOKEN.to_ascii_lowercase()).await.expect("resolve");

        assert_eq!(chain.reads().len(), 3);
        assert_eq!(resolver.known_tokens().await.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let chain = Arc::new(FakeChain::new());
        let resolver = resolver(&chain);

        resolver.resolve(NOT_A_TOKEN).await.expect("resolve");
        resolver.refresh(NOT_A_TOKEN).await.expect("refresh");

        assert_eq!(chain.reads().len(), 6);
        assert_eq!(resolver.known_tokens().await.len(), 1);
    }
}
