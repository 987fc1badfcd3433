use serde::{Deserialize, Serialize};
use ethers::types::{Address as ChainAddress, Bytes, TxHash};

// Basic types for swap operations
pub type Address = String;
pub type Amount = String;
pub type BlockNumber = u64;

/// A read-only contract call (`eth_call`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: ChainAddress,
    pub data: Bytes,
}

impl ContractCall {
    pub fn new(to: ChainAddress, data: impl Into<Bytes>) -> Self {
        Self { to, data: data.into() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Confirmed,
    Failed,
}

/// Result of waiting on a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionConfirmation {
    pub hash: TxHash,
    pub status: TransactionStatus,
    pub block_number: Option<BlockNumber>,
}

impl TransactionConfirmation {
    /// Mined without a revert
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }
}

// Result types for better error handling
pub type SwapResult<T> = Result<T, crate::shared::error::SwapError>;
