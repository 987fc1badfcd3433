//! Quote composition: oracle first, fallback model second

use super::fallback::FallbackRateModel;
use super::oracle::PriceOracle;
use crate::domain::entities::{Quote, QuoteSource, Token};
use crate::domain::repositories::PriceFeed;
use crate::infrastructure::config::SwapConfig;
use crate::shared::constants::ORACLE_QUOTE_DECIMALS;
use crate::shared::utils::{format_fixed, parse_positive_amount};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct QuoteEngine {
    oracle: PriceOracle,
    fallback: FallbackRateModel,
    fee_multiplier: Decimal,
}

impl QuoteEngine {
    pub fn new(feed: Arc<dyn PriceFeed>, fallback: FallbackRateModel, config: &SwapConfig) -> Self {
        Self {
            oracle: PriceOracle::new(feed),
            fallback,
            fee_multiplier: config.fee_multiplier,
        }
    }

    /// Best-effort quote for `from_amount` of `from`.
    ///
    /// Returns `None` only when the amount is not a positive number; no
    /// price lookup happens in that case.
    pub async fn quote(&self, from: &Token, to: &Token, from_amount: &str) -> Option<Quote> {
        let amount = parse_positive_amount(from_amount)?;

        let (from_price, to_price) = tokio::join!(
            self.oracle.get_usd_price(&from.address),
            self.oracle.get_usd_price(&to.address),
        );

        if let (Some(from_price), Some(to_price)) = (from_price, to_price) {
            match self.oracle_output(amount, from_price, to_price) {
                Some(output) => {
                    return Some(Quote {
                        from_token: from.clone(),
                        to_token: to.clone(),
                        from_amount: from_amount.trim().to_string(),
                        to_amount: format_fixed(output, ORACLE_QUOTE_DECIMALS),
                        source: QuoteSource::Oracle,
                    });
                }
                None => log::warn!(
                    "Oracle quote overflowed for {} {} -> {}, using fallback",
                    from_amount,
                    from.symbol,
                    to.symbol
                ),
            }
        }

        let rate = self.fallback.simulate_rate(&from.symbol, &to.symbol);
        let output = Decimal::from_f64(rate).and_then(|rate| amount.checked_mul(rate));
        let to_amount = match output {
            Some(output) => format_fixed(output, to.decimals as u32),
            None => {
                log::error!("Fallback rate {} for {} -> {} is unusable", rate, from.symbol, to.symbol);
                return None;
            }
        };

        log::debug!("Fallback quote {} -> {} at rate {}", from.symbol, to.symbol, rate);
        Some(Quote {
            from_token: from.clone(),
            to_token: to.clone(),
            from_amount: from_amount.trim().to_string(),
            to_amount,
            source: QuoteSource::Fallback,
        })
    }

    fn oracle_output(&self, amount: Decimal, from_price: Decimal, to_price: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(from_price)?
            .checked_div(to_price)?
            .checked_mul(self.fee_multiplier)
    }
}
