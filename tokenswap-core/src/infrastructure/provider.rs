//! JSON-RPC wallet provider backed by a local signing key

use crate::domain::repositories::WalletProvider;
use crate::infrastructure::config::SwapConfig;
use crate::shared::error::SwapError;
use crate::shared::types::{ContractCall, SwapResult, TransactionConfirmation, TransactionStatus};
use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, TxHash, U64};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const POLLING_INTERVAL: Duration = Duration::from_secs(2);

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub struct EthersWalletProvider {
    client: Arc<SignerClient>,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
}

impl EthersWalletProvider {
    pub fn new(config: &SwapConfig, private_key: &str) -> SwapResult<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| SwapError::config(format!("Failed to create HTTP provider for {}: {}", config.rpc_url, e)))?
            .interval(POLLING_INTERVAL);
        let wallet = LocalWallet::from_str(private_key.trim())
            .map_err(|e| SwapError::config(format!("Invalid private key: {}", e)))?
            .with_chain_id(config.chain_id);

        log::info!("Wallet provider ready for {:?} on chain {}", wallet.address(), config.chain_id);

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            rpc_timeout: config.rpc_timeout(),
            confirmation_timeout: config.confirmation_timeout(),
        })
    }

    /// Build from `TOKENSWAP_PRIVATE_KEY`
    pub fn from_env(config: &SwapConfig) -> SwapResult<Self> {
        let private_key = env::var("TOKENSWAP_PRIVATE_KEY")
            .map_err(|_| SwapError::config("TOKENSWAP_PRIVATE_KEY is required"))?;
        Self::new(config, &private_key)
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }
}

#[async_trait]
impl WalletProvider for EthersWalletProvider {
    async fn request_accounts(&self) -> SwapResult<Vec<Address>> {
        Ok(vec![self.client.address()])
    }

    async fn read(&self, call: ContractCall) -> SwapResult<Bytes> {
        let transaction: TypedTransaction = TransactionRequest::new().to(call.to).data(call.data).into();
        tokio::time::timeout(self.rpc_timeout, self.client.call(&transaction, None))
            .await?
            .map_err(|e| SwapError::contract(format!("Call to {:?} failed: {}", call.to, e)))
    }

    async fn send_transaction(&self, transaction: TransactionRequest) -> SwapResult<TxHash> {
        let pending = tokio::time::timeout(self.rpc_timeout, self.client.send_transaction(transaction, None))
            .await?
            .map_err(|e| SwapError::network(format!("Failed to send transaction: {}", e)))?;
        let hash = pending.tx_hash();
        log::debug!("Transaction {:?} broadcast", hash);
        Ok(hash)
    }

    async fn wait(&self, transaction_hash: TxHash) -> SwapResult<TransactionConfirmation> {
        let pending = PendingTransaction::new(transaction_hash, self.client.provider());
        let receipt = tokio::time::timeout(self.confirmation_timeout, pending)
            .await??
            .ok_or_else(|| SwapError::network(format!("Transaction {:?} was dropped", transaction_hash)))?;

        let status = if receipt.status == Some(U64::from(1)) {
            TransactionStatus::Confirmed
        } else {
            TransactionStatus::Failed
        };

        Ok(TransactionConfirmation {
            hash: receipt.transaction_hash,
            status,
            block_number: receipt.block_number.map(|block| block.as_u64()),
        })
    }
}
