//! Core swap functionality
//!
//! This module contains quoting, token metadata resolution, swap execution
//! and the swap lifecycle.

pub mod lifecycle;
pub mod pricing;
pub mod tokens;
pub mod transactions;

pub use lifecycle::{SwapStateMachine, SwapStatus};
pub use pricing::{FallbackRateModel, PriceOracle, QuoteEngine};
pub use tokens::{MetadataSource, ResolvedToken, TokenMetadataResolver};
pub use transactions::{min_amount_out, SwapExecutor};
