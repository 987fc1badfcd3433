//! Domain repositories
//!
//! This module contains the capability traits for external data access
//! following Domain-Driven Design principles.

pub mod wallet_provider;
pub mod price_feed;

// Re-export repositories
pub use wallet_provider::*;
pub use price_feed::*;
