//! Price discovery
//!
//! `QuoteEngine` asks `PriceOracle` for both reference prices and falls back
//! to `FallbackRateModel` when either one is unavailable.

pub mod fallback;
pub mod oracle;
pub mod quote_engine;

pub use fallback::FallbackRateModel;
pub use oracle::PriceOracle;
pub use quote_engine::QuoteEngine;
