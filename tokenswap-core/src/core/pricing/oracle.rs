//! Reference price lookup

use crate::domain::repositories::PriceFeed;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

/// USD price lookup that never fails.
///
/// Feed errors, missing entries and non-positive prices all come back as `None`.
#[derive(Clone)]
pub struct PriceOracle {
    feed: Arc<dyn PriceFeed>,
}

impl PriceOracle {
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        Self { feed }
    }

    pub async fn get_usd_price(&self, address: &str) -> Option<Decimal> {
        match self.feed.fetch_usd_price(address).await {
            Ok(Some(price)) if price.is_finite() && price > 0.0 => {
                let price = Decimal::from_f64(price);
                if price.is_none() {
                    log::debug!("Price for {} is not representable", address);
                }
                price
            }
            Ok(Some(price)) => {
                log::debug!("Ignoring unusable price {} for {}", price, address);
                None
            }
            Ok(None) => {
                log::debug!("No price listed for {}", address);
                None
            }
            Err(e) => {
                log::warn!("Price lookup failed for {}: {}", address, e);
                None
            }
        }
    }
}
