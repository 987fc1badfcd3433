//! Wallet provider capability
//!
//! The chain read/write surface the swap core needs from a connected wallet.

use crate::shared::types::{ContractCall, SwapResult, TransactionConfirmation};
use async_trait::async_trait;
use ethers::types::{Address, Bytes, TransactionRequest, TxHash};

/// Wallet provider trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the wallet exposes, first one is the active account
    async fn request_accounts(&self) -> SwapResult<Vec<Address>>;

    /// Read-only contract call
    async fn read(&self, call: ContractCall) -> SwapResult<Bytes>;

    /// Sign and broadcast a transaction
    async fn send_transaction(&self, transaction: TransactionRequest) -> SwapResult<TxHash>;

    /// Wait until a transaction is mined
    async fn wait(&self, transaction_hash: TxHash) -> SwapResult<TransactionConfirmation>;
}
