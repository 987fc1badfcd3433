//! CoinGecko token price client

use crate::domain::repositories::PriceFeed;
use crate::infrastructure::config::SwapConfig;
use crate::shared::error::SwapError;
use crate::shared::types::SwapResult;
use crate::shared::utils::normalize_address;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Looks up USD prices by contract address on one platform
pub struct CoinGeckoPriceFeed {
    client: Client,
    base_url: String,
    platform: String,
}

impl CoinGeckoPriceFeed {
    pub fn new(config: &SwapConfig) -> SwapResult<Self> {
        let client = Client::builder()
            .timeout(config.rpc_timeout())
            .build()
            .map_err(|e| SwapError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.price_feed_url.trim_end_matches('/').to_string(),
            platform: config.price_platform.clone(),
        })
    }

    fn price_url(&self) -> String {
        format!("{}/simple/token_price/{}", self.base_url, self.platform)
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoPriceFeed {
    async fn fetch_usd_price(&self, address: &str) -> SwapResult<Option<f64>> {
        let response = self
            .client
            .get(self.price_url())
            .query(&[("contract_addresses", address), ("vs_currencies", "usd")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SwapError::network(format!(
                "Price feed returned {} for {}",
                response.status(),
                address
            )));
        }

        let body: Value = response.json().await?;
        Ok(extract_usd_price(&body, address))
    }
}

/// Price entries are keyed by lowercase contract address
fn extract_usd_price(body: &Value, address: &str) -> Option<f64> {
    body.get(normalize_address(address))?.get("usd")?.as_f64()
}
