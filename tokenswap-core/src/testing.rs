//! In-memory chain and price feed used by the unit tests

use crate::core::transactions::abi::ContractAbi;
use crate::domain::repositories::{PriceFeed, WalletProvider};
use crate::shared::error::SwapError;
use crate::shared::types::{ContractCall, SwapResult, TransactionConfirmation, TransactionStatus};
use crate::shared::utils::normalize_address;
use async_trait::async_trait;
use ethers::abi::Token as AbiToken;
use ethers::types::{Address, Bytes, NameOrAddress, TransactionRequest, TxHash, U256};
use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

pub const TEST_WALLET: &str = "0x1234567890123456789012345678901234567890";

#[derive(Debug, Clone)]
struct TokenInfo {
    name: String,
    symbol: String,
    decimals: u8,
}

/// Order-preserving record of writes and confirmation waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    Sent(TxHash),
    Waited(TxHash),
}

#[derive(Default)]
struct ChainState {
    tokens: HashMap<Address, TokenInfo>,
    allowances: HashMap<Address, U256>,
    reads: Vec<ContractCall>,
    sent: Vec<TransactionRequest>,
    events: Vec<ChainEvent>,
    failed: HashSet<TxHash>,
    revert_swaps: bool,
    revert_approvals: bool,
    fail_reads: bool,
    next_hash: u64,
}

/// Single-account chain that understands the ERC20 calls the swap core makes
pub struct FakeChain {
    abi: ContractAbi,
    account: Address,
    state: Mutex<ChainState>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            abi: ContractAbi::load().expect("ABIs should parse"),
            account: address(TEST_WALLET),
            state: Mutex::new(ChainState::default()),
        }
    }

    pub fn with_token(self, token: &str, symbol: &str, name: &str, decimals: u8) -> Self {
        self.lock().tokens.insert(
            address(token),
            TokenInfo {
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals,
            },
        );
        self
    }

    pub fn with_allowance(self, token: &str, amount: U256) -> Self {
        self.lock().allowances.insert(address(token), amount);
        self
    }

    /// Swap transactions get mined with a failed status
    pub fn reverting_swaps(self) -> Self {
        self.lock().revert_swaps = true;
        self
    }

    /// Approvals get mined with a failed status and leave the allowance as is
    pub fn reverting_approvals(self) -> Self {
        self.lock().revert_approvals = true;
        self
    }

    /// Every read fails at the RPC level
    pub fn failing_reads(self) -> Self {
        self.lock().fail_reads = true;
        self
    }

    pub fn reads(&self) -> Vec<ContractCall> {
        self.lock().reads.clone()
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.lock().sent.clone()
    }

    pub fn events(&self) -> Vec<ChainEvent> {
        self.lock().events.clone()
    }

    pub fn sent_with_selector(&self, selector: [u8; 4]) -> Vec<TransactionRequest> {
        self.sent()
            .into_iter()
            .filter(|tx| selector_of(tx.data.as_ref()) == Some(selector))
            .collect()
    }

    pub fn approvals(&self) -> Vec<TransactionRequest> {
        self.sent_with_selector(self.selector("approve"))
    }

    pub fn allowance(&self, token: &str) -> U256 {
        self.lock().allowances.get(&address(token)).copied().unwrap_or_default()
    }

    pub fn selector(&self, name: &str) -> [u8; 4] {
        self.abi
            .erc20_function(name)
            .or_else(|_| self.abi.router_function(name))
            .expect("known function")
            .short_signature()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ChainState> {
        self.state.lock().expect("chain state poisoned")
    }
}

#[async_trait]
impl WalletProvider for FakeChain {
    async fn request_accounts(&self) -> SwapResult<Vec<Address>> {
        Ok(vec![self.account])
    }

    async fn read(&self, call: ContractCall) -> SwapResult<Bytes> {
        let mut state = self.lock();
        state.reads.push(call.clone());
        if state.fail_reads {
            return Err(SwapError::network("connection reset"));
        }

        let selector = selector_of(Some(&call.data));
        let output = if selector == Some(self.selector("allowance")) {
            let allowance = state.allowances.get(&call.to).copied().unwrap_or_default();
            vec![AbiToken::Uint(allowance)]
        } else {
            let info = state
                .tokens
                .get(&call.to)
                .ok_or_else(|| SwapError::contract("execution reverted"))?;
            if selector == Some(self.selector("name")) {
                vec![AbiToken::String(info.name.clone())]
            } else if selector == Some(self.selector("symbol")) {
                vec![AbiToken::String(info.symbol.clone())]
            } else if selector == Some(self.selector("decimals")) {
                vec![AbiToken::Uint(U256::from(info.decimals))]
            } else {
                return Err(SwapError::contract("execution reverted"));
            }
        };

        Ok(ethers::abi::encode(&output).into())
    }

    async fn send_transaction(&self, transaction: TransactionRequest) -> SwapResult<TxHash> {
        let approve = self.selector("approve");
        let data = transaction.data.clone().unwrap_or_default();
        let mut state = self.lock();

        state.next_hash += 1;
        let hash = TxHash::from_low_u64_be(state.next_hash);

        if selector_of(Some(&data)) == Some(approve) && state.revert_approvals {
            state.failed.insert(hash);
        } else if selector_of(Some(&data)) == Some(approve) {
            let args = self
                .abi
                .erc20_function("approve")?
                .decode_input(&data[4..])?;
            if let (Some(NameOrAddress::Address(token)), Some(AbiToken::Uint(amount))) =
                (transaction.to.clone(), args.get(1).cloned())
            {
                state.allowances.insert(token, amount);
            }
        } else if state.revert_swaps {
            state.failed.insert(hash);
        }

        state.sent.push(transaction);
        state.events.push(ChainEvent::Sent(hash));
        Ok(hash)
    }

    async fn wait(&self, transaction_hash: TxHash) -> SwapResult<TransactionConfirmation> {
        let mut state = self.lock();
        state.events.push(ChainEvent::Waited(transaction_hash));
        let status = if state.failed.contains(&transaction_hash) {
            TransactionStatus::Failed
        } else {
            TransactionStatus::Confirmed
        };
        Ok(TransactionConfirmation {
            hash: transaction_hash,
            status,
            block_number: Some(19_000_000 + state.next_hash),
        })
    }
}

/// Fixed USD prices with optional per-call delays
#[derive(Default)]
pub struct StaticPriceFeed {
    prices: HashMap<String, f64>,
    delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<String>>,
}

impl StaticPriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, token: &str, price: f64) -> Self {
        self.prices.insert(normalize_address(token), price);
        self
    }

    /// Delays consumed one per lookup, in call order
    pub fn with_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.delays.lock().expect("delays poisoned").extend(delays);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls poisoned").clone()
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch_usd_price(&self, token: &str) -> SwapResult<Option<f64>> {
        self.calls.lock().expect("calls poisoned").push(token.to_string());
        let delay = self.delays.lock().expect("delays poisoned").pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.prices.get(&normalize_address(token)).copied())
    }
}

pub fn address(value: &str) -> Address {
    Address::from_str(value).expect("valid test address")
}

fn selector_of(data: Option<&Bytes>) -> Option<[u8; 4]> {
    let data = data?;
    if data.len() < 4 {
        return None;
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    Some(selector)
}
