//! TokenSwap Core
//!
//! Quoting and execution engine for swapping one ERC20 token for another
//! through a Uniswap V2 style router.
//!
//! ## Architecture
//!
//! - **Core**: Pricing, token metadata, swap execution, lifecycle
//! - **Domain**: Entities and capability traits
//! - **Application**: The swap form session an external UI drives
//! - **Infrastructure**: Configuration, JSON-RPC wallet, price feed client
//! - **Shared**: Common types, constants, errors and utilities
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), tokenswap_core::SwapError> {
//! use tokenswap_core::{find_common_token, init_swap_core};
//!
//! let core = init_swap_core().await?;
//! let session = &core.session;
//!
//! session.connect_wallet().await?;
//! session.select_from_token(find_common_token("WETH").expect("WETH")).await;
//! session.select_to_token(find_common_token("USDC").expect("USDC")).await;
//! session.set_from_amount("1").await;
//!
//! println!("{:?}", session.exchange_rate());
//! session.submit().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod application;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod testing;

// Re-export specific components
pub use crate::application::{SwapSession, SwapSnapshot, TokenSide};
pub use crate::core::{
    FallbackRateModel, MetadataSource, QuoteEngine, ResolvedToken, SwapExecutor, SwapStatus,
    TokenMetadataResolver,
};
pub use crate::domain::{common_tokens, find_common_token, Quote, QuoteSource, SwapOutcome, SwapReceipt, Token};
pub use crate::domain::{PriceFeed, WalletProvider};
pub use crate::infrastructure::{CoinGeckoPriceFeed, EthersWalletProvider, SwapConfig};
pub use shared::error::SwapError;
pub use shared::types::SwapResult;

/// Initialize logging from `RUST_LOG`. Safe to call more than once.
pub fn init() {
    dotenv::dotenv().ok();
    if env_logger::Builder::from_default_env().try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Quote engine backed by the configured price feed and an entropy-seeded fallback model
pub fn build_quote_engine(config: &SwapConfig) -> SwapResult<QuoteEngine> {
    let feed = CoinGeckoPriceFeed::new(config)?;
    Ok(QuoteEngine::new(Arc::new(feed), FallbackRateModel::new(), config))
}

/// Initialize the swap core with configuration from .env or safe defaults
pub async fn init_swap_core() -> SwapResult<SwapCore> {
    init();
    let config = SwapConfig::from_env()?;
    let provider = Arc::new(EthersWalletProvider::from_env(&config)?);
    SwapCore::new(config, provider)
}

/// Configured swap core
pub struct SwapCore {
    pub config: SwapConfig,
    pub quotes: Arc<QuoteEngine>,
    pub session: SwapSession,
}

impl SwapCore {
    pub fn new(config: SwapConfig, provider: Arc<dyn WalletProvider>) -> SwapResult<Self> {
        config.validate()?;
        let quotes = Arc::new(build_quote_engine(&config)?);
        let session = SwapSession::new(provider, quotes.clone(), &config)?;

        log::info!(
            "{} {} ready on chain {} (router {})",
            NAME,
            VERSION,
            config.chain_id,
            config.router_address
        );

        Ok(Self {
            config,
            quotes,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChain;

    #[tokio::test]
    async fn test_swap_core_initialization() {
        init();
        init();

        let core = SwapCore::new(SwapConfig::default(), Arc::new(FakeChain::new()))
            .expect("Failed to initialize swap core");
        assert_eq!(core.session.snapshot().status, SwapStatus::Idle);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SwapConfig {
            slippage_bps: 20_000,
            ..SwapConfig::default()
        };
        assert!(matches!(
            SwapCore::new(config, Arc::new(FakeChain::new())),
            Err(SwapError::Config(_))
        ));
    }
}
