//! Infrastructure layer - configuration and external integrations
//!
//! This module contains the configuration loader and the production
//! implementations of the chain and price feed capabilities.

pub mod config;
pub mod price_feed;
pub mod provider;

// Re-export infrastructure components
pub use config::SwapConfig;
pub use price_feed::CoinGeckoPriceFeed;
pub use provider::EthersWalletProvider;
