//! Application use cases
//!
//! This module contains the use cases that orchestrate the core and
//! infrastructure layers.

pub mod swap_session;

// Re-export use cases
pub use swap_session::*;
