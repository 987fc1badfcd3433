//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts of a token swap.

pub mod token;
pub mod quote;
pub mod swap;

// Re-export entities
pub use token::*;
pub use quote::*;
pub use swap::*;
