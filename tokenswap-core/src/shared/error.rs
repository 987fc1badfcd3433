//! Error handling for the swap core
//!
//! This module defines the error types used throughout the swap core.
//! Only `Validation` is meant to reach the user as-is; every failure that
//! happens after the first chain interaction of a swap is collapsed into
//! `Execution` by the executor.

use thiserror::Error;

/// Swap error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Swap execution failed: {0}")]
    Execution(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwapError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a contract error
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::network(format!("Invalid JSON response: {}", err))
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("HTTP request timed out: {}", err))
        } else {
            Self::network(format!("HTTP request failed: {}", err))
        }
    }
}

impl From<tokio::time::error::Elapsed> for SwapError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::timeout(format!("Operation timed out: {}", err))
    }
}

impl From<tokio::task::JoinError> for SwapError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

// Chain error conversions
impl From<ethers::abi::Error> for SwapError {
    fn from(err: ethers::abi::Error) -> Self {
        Self::contract(format!("ABI error: {}", err))
    }
}

impl From<ethers::abi::ParseError> for SwapError {
    fn from(err: ethers::abi::ParseError) -> Self {
        Self::internal(format!("ABI parse error: {}", err))
    }
}

impl From<ethers::providers::ProviderError> for SwapError {
    fn from(err: ethers::providers::ProviderError) -> Self {
        Self::network(format!("Provider error: {}", err))
    }
}

impl From<rust_decimal::Error> for SwapError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::validation(format!("Invalid decimal amount: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_error_creation() {
        let config_error = SwapError::config("Invalid configuration");
        let execution_error = SwapError::execution("Swap reverted");
        let validation_error = SwapError::validation("Invalid input");

        assert!(matches!(config_error, SwapError::Config(_)));
        assert!(matches!(execution_error, SwapError::Execution(_)));
        assert!(validation_error.is_validation());
        assert!(!execution_error.is_validation());
    }

    #[test]
    fn test_error_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let swap_error: SwapError = json_error.into();
        assert!(matches!(swap_error, SwapError::Network(_)));

        let decimal_error = "abc".parse::<rust_decimal::Decimal>().unwrap_err();
        let swap_error: SwapError = decimal_error.into();
        assert!(swap_error.is_validation());
    }

    #[test]
    fn test_error_display() {
        let error = SwapError::execution("allowance read failed");
        let display = format!("{}", error);

        assert!(display.contains("Swap execution failed"));
        assert!(display.contains("allowance read failed"));
    }
}
