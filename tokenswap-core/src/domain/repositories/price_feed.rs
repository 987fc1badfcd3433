//! Price feed repository

use crate::shared::types::SwapResult;
use async_trait::async_trait;

/// External USD price source keyed by token contract address
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// USD price of the token, `None` when the feed has no entry for it
    async fn fetch_usd_price(&self, address: &str) -> SwapResult<Option<f64>>;
}
