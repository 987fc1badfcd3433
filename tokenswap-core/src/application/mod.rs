//! Application layer - use cases
//!
//! This module contains the application logic that drives the swap core on
//! behalf of an external UI.

pub mod use_cases;

// Re-export application components
pub use use_cases::*;
